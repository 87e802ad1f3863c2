#![no_main]

use libfuzzer_sys::fuzz_target;
use oci_digest::{DIGEST_REGEX_ANCHORED, Digest};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        // Non-UTF-8 text must be rejected without touching the target
        let mut d = Digest::default();
        assert!(d.unmarshal_text(data).is_err());
        assert!(d.is_zero());
        return;
    };

    match oci_digest::parse(s) {
        Ok(d) if s.is_empty() => assert!(d.is_zero()),
        Ok(d) => {
            // Anything accepted is well-formed and round-trips exactly
            assert!(DIGEST_REGEX_ANCHORED.is_match(s));
            assert_eq!(d.to_string(), s);
            assert_eq!(oci_digest::parse(&d.to_string()).unwrap(), d);

            let alg = d.algorithm().unwrap();
            assert_eq!(d.encoded().len(), alg.size() * 2);
        }
        Err(_) => {
            let mut d = Digest::default();
            assert!(d.unmarshal_text(data).is_err());
            assert!(d.is_zero());
        }
    }
});
