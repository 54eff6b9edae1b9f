use super::encode::*;
use super::value::{Map, SimpleValue, Value};
use alloc::{boxed::Box, vec};
use hex_literal::hex;

#[test]
fn rfc_tests() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a

    assert_eq!(*emit(&0), hex!("00"));
    assert_eq!(*emit(&1), hex!("01"));
    assert_eq!(*emit(&10), hex!("0a"));
    assert_eq!(*emit(&23), hex!("17"));
    assert_eq!(*emit(&24), hex!("1818"));
    assert_eq!(*emit(&25), hex!("1819"));
    assert_eq!(*emit(&100), hex!("1864"));
    assert_eq!(*emit(&1000), hex!("1903e8"));
    assert_eq!(*emit(&1000000), hex!("1a000f4240"));
    assert_eq!(*emit(&1000000000000u64), hex!("1b000000e8d4a51000"));
    assert_eq!(*emit(&18446744073709551615u64), hex!("1bffffffffffffffff"));
    assert_eq!(*emit(&-1), hex!("20"));
    assert_eq!(*emit(&-10), hex!("29"));
    assert_eq!(*emit(&-100), hex!("3863"));
    assert_eq!(*emit(&-1000), hex!("3903e7"));
    assert_eq!(*emit(&i64::MIN), hex!("3b7fffffffffffffff"));

    assert_eq!(*emit(&0.0), hex!("f90000"));
    assert_eq!(*emit(&-0.0), hex!("f98000"));
    assert_eq!(*emit(&1.0), hex!("f93c00"));
    assert_eq!(*emit(&1.1), hex!("fb3ff199999999999a"));
    assert_eq!(*emit(&1.5), hex!("f93e00"));
    assert_eq!(*emit(&65504.0), hex!("f97bff"));
    assert_eq!(*emit(&100000.0), hex!("fa47c35000"));
    assert_eq!(*emit(&3.4028234663852886e+38), hex!("fa7f7fffff"));
    assert_eq!(*emit(&1.0e+300), hex!("fb7e37e43c8800759c"));
    assert_eq!(*emit(&5.960464477539063e-8), hex!("f90001"));
    assert_eq!(*emit(&0.00006103515625), hex!("f90400"));
    assert_eq!(*emit(&-4.0), hex!("f9c400"));
    assert_eq!(*emit(&-4.1), hex!("fbc010666666666666"));

    /* According to https://www.rfc-editor.org/rfc/rfc8949.html#section-4.2.2
    NaN and +-INF go to their half-precision forms when canonically encoding */
    assert_eq!(*emit(&f32::NAN), hex!("f97e00"));
    assert_eq!(*emit(&f64::NAN), hex!("f97e00"));
    assert_eq!(*emit(&f32::INFINITY), hex!("f97c00"));
    assert_eq!(*emit(&f32::NEG_INFINITY), hex!("f9fc00"));
    assert_eq!(*emit(&f64::INFINITY), hex!("f97c00"));
    assert_eq!(*emit(&f64::NEG_INFINITY), hex!("f9fc00"));

    assert_eq!(*emit(&false), hex!("f4"));
    assert_eq!(*emit(&true), hex!("f5"));
    assert_eq!(*emit(&None::<i32>), hex!("f6"));
    assert_eq!(*emit(&Value::Undefined), hex!("f7"));
    assert_eq!(
        *emit(&Value::Simple(SimpleValue::try_from(16).unwrap())),
        hex!("f0")
    );
    assert_eq!(
        *emit(&Value::Simple(SimpleValue::try_from(255).unwrap())),
        hex!("f8ff")
    );

    assert_eq!(
        *emit_tagged("2013-03-21T20:04:00Z", 0),
        hex!("c074323031332d30332d32315432303a30343a30305a")
    );
    assert_eq!(*emit_tagged(&1363896240, 1), hex!("c11a514b67b0"));
    assert_eq!(
        *emit_tagged(&1363896240.5, 1),
        hex!("c1fb41d452d9ec200000")
    );
    assert_eq!(*emit_tagged(&hex!("01020304"), 23), hex!("d74401020304"));
    assert_eq!(
        *emit_tagged(&hex!("6449455446"), 24),
        hex!("d818456449455446")
    );

    assert_eq!(*emit(&[0u8; 0]), hex!("40"));
    assert_eq!(*emit(&hex!("01020304")), hex!("4401020304"));
    assert_eq!(*emit(""), hex!("60"));
    assert_eq!(*emit("a"), hex!("6161"));
    assert_eq!(*emit("IETF"), hex!("6449455446"));
    assert_eq!(*emit("\"\\"), hex!("62225c"));
    assert_eq!(*emit("\u{00fc}"), hex!("62c3bc"));
    assert_eq!(*emit("\u{6c34}"), hex!("63e6b0b4"));
    assert_eq!(*emit("\u{10151}"), hex!("64f0908591"));

    assert_eq!(*emit_array(0, |_| {}), hex!("80"));
    assert_eq!(
        *emit_array(3, |a| {
            a.emit(&1);
            a.emit(&2);
            a.emit(&3);
        }),
        hex!("83010203")
    );
    assert_eq!(
        *emit_array(3, |a| {
            a.emit(&1);
            a.emit_array(2, |a| {
                a.emit(&2);
                a.emit(&3);
            });
            a.emit_array(2, |a| {
                a.emit(&4);
                a.emit(&5);
            });
        }),
        hex!("8301820203820405")
    );
    assert_eq!(
        *emit_array(25, |a| {
            for i in 1..=25 {
                a.emit(&i);
            }
        }),
        hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819")
    );

    assert_eq!(*emit(&Map::new()), hex!("a0"));
    assert_eq!(
        *emit_map(2, |m| {
            m.emit(&1);
            m.emit(&2);
            m.emit(&3);
            m.emit(&4);
        }),
        hex!("a201020304")
    );
    assert_eq!(
        *emit_map(2, |m| {
            m.emit("a");
            m.emit(&1);
            m.emit("b");
            m.emit_array(2, |a| {
                a.emit(&2);
                a.emit(&3);
            });
        }),
        hex!("a26161016162820203")
    );
}

#[test]
fn canonical_map_order() {
    // RFC 8949 §4.2.1: keys sort by the bytewise order of their encodings
    let m: Map = [
        (Value::from("aa"), Value::from(0)),
        (Value::from(-1), Value::from(0)),
        (Value::from(100), Value::from(0)),
        (Value::from("b"), Value::from(0)),
        (Value::from(10), Value::from(0)),
        (Value::from(false), Value::from(0)),
        (Value::from(vec![Value::from(100)]), Value::from(0)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        *emit(&m),
        hex!("a7 0a00 186400 2000 616200 62616100 81186400 f400")
    );
}

#[test]
fn value_encoding() {
    let v = Value::Array(vec![
        Value::from(hex!("a10126")),
        Value::Map([(1, -7)].into_iter().collect()),
        Value::Null,
        Value::Tagged(18, Box::new(Value::from("x"))),
    ]);
    assert_eq!(*emit(&v), hex!("84 43a10126 a10126 f6 d26178"));
}

#[test]
#[should_panic]
fn short_sequence() {
    emit_array(2, |a| a.emit(&1));
}

#[test]
#[should_panic]
fn long_sequence() {
    emit_array(1, |a| {
        a.emit(&1);
        a.emit(&2);
    });
}
