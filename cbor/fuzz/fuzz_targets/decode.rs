#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some((value, _, _))) = cose_cbor::decode::try_parse_value(data) {
        // Whatever we accept must re-encode canonically
        let encoded = cose_cbor::encode::emit(&value);
        let Ok((_, true)) = cose_cbor::decode::parse_detail(&encoded) else {
            panic!("Re-encoding borked: {value:?}");
        };
    }
});

// cargo cov -- export --format=lcov  -instr-profile ./fuzz/coverage/decode/coverage.profdata ./target/x86_64-unknown-linux-gnu/coverage/x86_64-unknown-linux-gnu/release/decode -ignore-filename-regex='/.cargo/|rustc/|/target/' > ./fuzz/coverage/decode/lcov.info
