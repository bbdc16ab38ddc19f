#![no_main]

use base64_external::{engine::general_purpose::STANDARD, Engine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let lax = b64::STANDARD.decode(input);
    let length = b64::STANDARD.byte_length(input);

    match (&lax, length) {
        (Ok(decoded), Ok(length)) => assert_eq!(decoded.len(), length, "Length law violated"),
        (Err(a), Err(b)) => assert_eq!(*a, b),
        _ => panic!("decode and byte_length disagree on {:?}", input),
    }

    // Anything the strict decoder accepts, the lax decoder and the external crate agree on
    if let Ok(strict) = b64::STANDARD_STRICT.decode(input) {
        assert_eq!(lax.as_ref().ok(), Some(&strict));
        if let Ok(external) = STANDARD.decode(input) {
            assert_eq!(external, strict, "External crate decode mismatch");
        }
    }
});
