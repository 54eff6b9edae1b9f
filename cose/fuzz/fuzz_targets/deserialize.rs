#![no_main]

use cose::prelude::*;
use libfuzzer_sys::fuzz_target;

fn check<T: TaggedCoseStructure>(data: &[u8]) {
    if let Ok(msg) = T::deserialize_tagged(data) {
        // Protected header bytes must survive a round trip untouched
        let data = msg.serialize();
        let Ok(msg2) = T::deserialize(&data) else {
            panic!("Re-encoding borked");
        };
        assert_eq!(msg.protected_header_bytes(), msg2.protected_header_bytes());
        assert_eq!(data, msg2.serialize());
        _ = msg.protected_headers();
    }
}

fuzz_target!(|data: &[u8]| {
    check::<Sign1Message>(data);
    check::<MacMessage>(data);
    check::<Mac0Message>(data);
    check::<Encrypt0Message>(data);
    check::<EncryptMessage>(data);
});

// cargo cov -- export --format=lcov  -instr-profile ./fuzz/coverage/deserialize/coverage.profdata ./target/x86_64-unknown-linux-gnu/coverage/x86_64-unknown-linux-gnu/release/deserialize -ignore-filename-regex='/.cargo/|rustc/|/target/' > ./fuzz/coverage/deserialize/lcov.info
