#![no_main]

use base64_external::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for (engine, external) in [(b64::STANDARD, &STANDARD), (b64::URL_SAFE, &URL_SAFE)] {
        let encoded = engine.encode(data);
        assert_eq!(encoded.len(), b64::encoded_len(data.len()));

        // Roundtrip through both decoders
        let decoded = engine.decode(&encoded).expect("encoded output has a valid length");
        assert_eq!(data, &decoded[..], "Roundtrip failed");
        let strict = b64::Engine::new(engine.config().with_mode(b64::DecodeMode::Strict));
        assert_eq!(strict.decode(&encoded), Ok(decoded), "Strict roundtrip failed");

        // Conformance with external crate
        assert_eq!(encoded, external.encode(data), "External crate encode mismatch");
    }
});
