use super::*;
use hex_literal::hex;

const CONTENT: &[u8] = b"This is the content.";
const TAG: [u8; 32] = hex!("2BDCC89F058216B8A208DDC6D8B54AA91F48BD63484986565105C9AD5A6682F6");

const MAC: [u8; 80] = hex!(
    "8543A10105A054546869732069732074686520636F6E74656E742E5820"
    "2BDCC89F058216B8A208DDC6D8B54AA91F48BD63484986565105C9AD5A6682F6"
    "818340A20125044A6F75722D73656372657440"
);

const RECIPIENT: [u8; 18] = hex!("8340A20125044A6F75722D73656372657440");

fn recipient(kid: &[u8]) -> Recipient {
    let mut unprotected = HeaderMap::new();
    unprotected.set_key_id(kid);
    unprotected.set_algorithm(Algorithm::Direct);

    RecipientBuilder::new()
        .with_protected_headers(HeaderMap::new())
        .unwrap()
        .with_unprotected_headers(unprotected)
        .with_ciphertext([0u8; 0])
        .build()
        .unwrap()
}

fn protected() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.set_algorithm(Algorithm::HMAC_256_256);
    h
}

#[test]
fn fixture() {
    let msg = MacMessage::deserialize(&MAC).unwrap();

    assert_eq!(msg.message(), CONTENT);
    assert_eq!(msg.tag(), TAG);
    assert_eq!(msg.protected_header_bytes(), hex!("A10105"));
    assert_eq!(msg.protected_headers().unwrap(), protected());
    assert_eq!(
        msg.protected_headers().unwrap().algorithm().unwrap(),
        Some(Algorithm::HMAC_256_256)
    );
    assert!(msg.unprotected_headers().is_empty());

    let [r] = msg.recipients() else {
        panic!("Expected one recipient");
    };
    assert!(r.protected_header_bytes().is_empty());
    assert!(r.protected_headers().unwrap().is_empty());
    assert!(r.ciphertext().is_empty());
    assert_eq!(
        r.unprotected_headers().algorithm().unwrap(),
        Some(Algorithm::Direct)
    );
    assert_eq!(
        r.unprotected_headers().key_id().unwrap(),
        Some(&b"our-secret"[..])
    );

    assert_eq!(msg.serialize(), MAC);
    assert_eq!(r.serialize(), RECIPIENT);
    assert_eq!(Recipient::deserialize(&RECIPIENT).unwrap(), *r);
}

#[test]
fn build_fixture() {
    let msg = MacBuilder::new()
        .with_protected_headers(protected())
        .unwrap()
        .with_unprotected_headers(HeaderMap::new())
        .with_message(CONTENT)
        .with_tag(TAG)
        .add_recipient(recipient(b"our-secret"))
        .build()
        .unwrap();

    assert_eq!(msg.serialize(), MAC);
    assert_eq!(MacMessage::deserialize(&msg.serialize()).unwrap(), msg);
}

#[test]
fn recipient_order() {
    let msg = MacBuilder::new()
        .with_protected_header_bytes(hex!("A10105"))
        .unwrap()
        .with_unprotected_headers(HeaderMap::new())
        .with_message(CONTENT)
        .with_tag(TAG)
        .with_recipients(vec![recipient(b"first")])
        .add_recipient(recipient(b"second"))
        .add_recipient(recipient(b"third"))
        .build()
        .unwrap();

    let decoded = MacMessage::deserialize(&msg.serialize()).unwrap();
    let kids = decoded
        .recipients()
        .iter()
        .map(|r| r.unprotected_headers().key_id().unwrap().unwrap().to_vec())
        .collect::<Vec<_>>();
    assert_eq!(kids, [&b"first"[..], b"second", b"third"]);
    assert_eq!(decoded, msg);
}

#[test]
fn empty_recipients() {
    let msg = MacBuilder::new()
        .with_protected_header_bytes(hex!("A10105"))
        .unwrap()
        .with_unprotected_headers(HeaderMap::new())
        .with_message(CONTENT)
        .with_tag(TAG)
        .with_recipients(Vec::new())
        .build()
        .unwrap();

    let data = msg.serialize();
    assert_eq!(data[data.len() - 1], 0x80);
    assert!(
        MacMessage::deserialize(&data)
            .unwrap()
            .recipients()
            .is_empty()
    );
}

#[test]
fn completeness() {
    assert!(matches!(
        MacBuilder::new()
            .with_protected_header_bytes(hex!("A10105"))
            .unwrap()
            .with_unprotected_headers(HeaderMap::new())
            .with_message(CONTENT)
            .with_tag(TAG)
            .build(),
        Err(Error::MissingField {
            message: "COSE_Mac",
            field: "recipients"
        })
    ));
    assert!(matches!(
        MacBuilder::new()
            .with_protected_header_bytes(hex!("A10105"))
            .unwrap()
            .with_unprotected_headers(HeaderMap::new())
            .with_message(CONTENT)
            .add_recipient(recipient(b"our-secret"))
            .build(),
        Err(Error::MissingField { field: "tag", .. })
    ));
    assert!(matches!(
        RecipientBuilder::new()
            .with_protected_header_bytes([0u8; 0])
            .unwrap()
            .with_unprotected_headers(HeaderMap::new())
            .build(),
        Err(Error::MissingField {
            message: "COSE_recipient",
            field: "ciphertext"
        })
    ));
    assert!(matches!(
        RecipientBuilder::new()
            .with_protected_headers(HeaderMap::new())
            .unwrap()
            .with_protected_header_bytes([0u8; 0]),
        Err(Error::ConflictingProtectedHeaders)
    ));
}

#[test]
fn decode_errors() {
    // COSE_Mac0 shaped input
    assert!(matches!(
        MacMessage::deserialize(&hex!("84 43A10105 A0 40 40")),
        Err(Error::Decode(DecodeError::ArityMismatch {
            message: "COSE_Mac",
            expected: 5,
            received: 4
        }))
    ));
    // Recipient with a nested recipient list
    assert!(matches!(
        MacMessage::deserialize(&hex!("85 40 A0 40 40 81 84 40 A0 40 80")),
        Err(Error::Decode(DecodeError::ArityMismatch {
            message: "COSE_recipient",
            expected: 3,
            received: 4
        }))
    ));
    // Recipients not an array
    assert!(matches!(
        MacMessage::deserialize(&hex!("85 40 A0 40 40 A0")),
        Err(Error::Decode(DecodeError::TypeMismatch {
            field: "recipients",
            ..
        }))
    ));
    assert!(matches!(
        MacMessage::deserialize(&hex!("85 40 A0 40 40 81 40")),
        Err(Error::Decode(DecodeError::TypeMismatch {
            field: "COSE_recipient",
            ..
        }))
    ));
    assert!(matches!(
        Recipient::deserialize(&hex!("82 40 A0")),
        Err(Error::Decode(DecodeError::ArityMismatch {
            expected: 3,
            received: 2,
            ..
        }))
    ));
    assert!(matches!(
        MacMessage::deserialize(&hex!("85 40 A0 40 80 80")),
        Err(Error::Decode(DecodeError::TypeMismatch { field: "tag", .. }))
    ));
}

#[test]
fn tagged() {
    let msg = MacMessage::deserialize(&MAC).unwrap();
    let tagged = msg.serialize_tagged();
    assert_eq!(tagged[..2], hex!("D861"));
    assert_eq!(tagged[2..], MAC);
    assert_eq!(MacMessage::deserialize_tagged(&tagged).unwrap(), msg);

    // A COSE_Mac0 tag on a COSE_Mac body
    let mut wrong = MAC.to_vec();
    wrong.insert(0, 0xD1);
    assert!(matches!(
        MacMessage::deserialize_tagged(&wrong),
        Err(Error::Decode(DecodeError::UnexpectedTag {
            expected: 97,
            found: 17
        }))
    ));
}

#[test]
fn to_be_maced() {
    let msg = MacMessage::deserialize(&MAC).unwrap();
    let mut expected = hex!("84634D414343A101054054").to_vec();
    expected.extend_from_slice(CONTENT);
    assert_eq!(msg.to_be_maced(&[]), expected);
}

#[test]
fn mac0() {
    let msg = Mac0Builder::new()
        .with_protected_headers(protected())
        .unwrap()
        .with_unprotected_headers(HeaderMap::new())
        .with_message(CONTENT)
        .with_tag(TAG)
        .build()
        .unwrap();

    let data = msg.serialize();
    assert_eq!(data[1..27], MAC[1..27]);
    assert_eq!(data[0], 0x84);
    assert_eq!(data[27..], MAC[27..61]);

    let decoded = Mac0Message::deserialize(&data).unwrap();
    assert_eq!(decoded, msg);
    assert_eq!(decoded.tag(), TAG);

    let mut expected = hex!("84644D41433043A101054054").to_vec();
    expected.extend_from_slice(CONTENT);
    assert_eq!(decoded.to_be_maced(&[]), expected);

    assert_eq!(msg.serialize_tagged()[0], 0xD1);
    assert!(matches!(
        Mac0Message::deserialize(&MAC),
        Err(Error::Decode(DecodeError::ArityMismatch {
            message: "COSE_Mac0",
            expected: 4,
            received: 5
        }))
    ));
    assert!(matches!(
        Mac0Builder::new()
            .with_protected_headers(protected())
            .unwrap()
            .with_unprotected_headers(HeaderMap::new())
            .with_tag(TAG)
            .build(),
        Err(Error::MissingField {
            message: "COSE_Mac0",
            field: "payload"
        })
    ));
}

#[test]
fn protected_forms_exclusive() {
    assert!(matches!(
        MacBuilder::new()
            .with_protected_header_bytes(hex!("A10105"))
            .unwrap()
            .with_protected_headers(protected()),
        Err(Error::ConflictingProtectedHeaders)
    ));
    assert!(matches!(
        MacBuilder::new()
            .with_protected_headers(protected())
            .unwrap()
            .with_protected_header_bytes(hex!("A10105")),
        Err(Error::ConflictingProtectedHeaders)
    ));
    assert!(matches!(
        Mac0Builder::new()
            .with_protected_header_bytes(hex!("A10105"))
            .unwrap()
            .with_protected_headers(protected()),
        Err(Error::ConflictingProtectedHeaders)
    ));
    assert!(matches!(
        Mac0Builder::new()
            .with_protected_headers(protected())
            .unwrap()
            .with_protected_header_bytes(hex!("A10105")),
        Err(Error::ConflictingProtectedHeaders)
    ));
}
