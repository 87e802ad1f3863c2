#![no_main]

use std::io::Write;

use libfuzzer_sys::fuzz_target;
use oci_digest::{Algorithm, Reader, Writer};

fuzz_target!(|data: Vec<u8>| {
    for alg in [Algorithm::sha256(), Algorithm::sha512(), Algorithm::blake3()] {
        let expected = alg.from_bytes(&data).unwrap();

        // Split writes at a data-dependent stride
        let stride = data.first().map_or(1, |&b| b as usize + 1);
        let mut w = Writer::new(Vec::new(), &alg);
        for piece in data.chunks(stride) {
            w.write_all(piece).unwrap();
        }

        // Verify: pass-through is exact and the digest matches one-shot
        assert_eq!(w.digest().unwrap(), expected);
        assert!(w.verify(&expected));
        assert_eq!(w.into_inner().unwrap(), data);

        let mut r = Reader::new(&data[..], &alg);
        r.read_all().unwrap();
        assert_eq!(r.digest().unwrap(), expected);

        // Verify: encoded digest parses back to itself
        assert_eq!(oci_digest::parse(&expected.to_string()).unwrap(), expected);
    }
});
