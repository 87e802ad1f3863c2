// Integration tests for the public digest API
// Tests cover: registry, parsing, round-trips, pass-through streams, serde

use std::io::{Read, Write};
use std::sync::Arc;

use oci_digest::{
    Algorithm, Digest, DigestError, EncodeHex, Reader, Registry, Writer, from_bytes, from_reader,
    from_string, hash, lookup, parse, register,
};

const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const SHA256_EMPTY_JSON: &str = "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a";
const SHA512_EMPTY: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

fn sample_inputs() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"{}".to_vec(),
        b"hello world".to_vec(),
        (0..4096).map(|i| (i % 256) as u8).collect(),
        vec![0u8; 100_003],
    ]
}

// ============================================================================
// Canonical Free Functions
// ============================================================================

#[test]
fn test_known_vectors() {
    assert_eq!(from_bytes(b"").unwrap().encoded(), SHA256_EMPTY);
    assert_eq!(from_string("{}").unwrap().encoded(), SHA256_EMPTY_JSON);
    assert_eq!(
        from_reader(&b"{}"[..]).unwrap().to_string(),
        format!("sha256:{SHA256_EMPTY_JSON}")
    );
    assert_eq!(
        Algorithm::sha512().from_bytes(b"").unwrap().encoded(),
        SHA512_EMPTY
    );
}

#[test]
fn test_determinism() {
    for input in sample_inputs() {
        let a = from_bytes(&input).unwrap();
        let b = from_bytes(&input).unwrap();
        assert_eq!(a, b, "same input should give the same digest");
    }
}

#[test]
fn test_canonical_is_sha256() {
    assert_eq!(oci_digest::canonical().name(), "sha256");
    assert_eq!(from_bytes(b"x").unwrap().algorithm_name(), "sha256");
}

// ============================================================================
// Round-trip Properties
// ============================================================================

#[test]
fn test_parse_round_trip_for_every_builtin() {
    let algorithms = [
        Algorithm::sha256(),
        Algorithm::sha512(),
        #[cfg(feature = "hash-blake3")]
        Algorithm::blake3(),
    ];

    for alg in algorithms {
        for input in sample_inputs() {
            let d = alg.from_bytes(&input).unwrap();
            let parsed = parse(&d.to_string()).unwrap();
            assert_eq!(parsed, d, "round trip failed for {alg}");
            assert_eq!(parsed.algorithm().unwrap(), alg);
        }
    }
}

#[test]
fn test_from_encoded_matches_computed() {
    let computed = Algorithm::sha256().from_string("{}").unwrap();
    let declared = Digest::from_encoded(&Algorithm::sha256(), SHA256_EMPTY_JSON).unwrap();
    assert_eq!(computed, declared);
}

// ============================================================================
// Zero Value
// ============================================================================

#[test]
fn test_zero_value_safety() {
    let zero = Digest::default();
    assert_eq!(zero.to_string(), "");
    assert!(zero.is_zero());
    assert_eq!(parse("").unwrap(), zero);
    assert!(zero.marshal_text().unwrap().is_empty());
}

// ============================================================================
// Grammar Rejection
// ============================================================================

#[test]
fn test_parse_rejections() {
    assert!(matches!(parse("sha256"), Err(DigestError::DigestInvalid(_))));
    assert!(matches!(
        parse(&format!("unknown:{SHA256_EMPTY}")),
        Err(DigestError::AlgorithmUnknown(_))
    ));
    assert!(matches!(
        parse(&format!("sha256:{SHA256_EMPTY}1234")),
        Err(DigestError::EncodingInvalid(_))
    ));
    assert!(matches!(
        parse(&format!("sha256:{}", "z".repeat(64))),
        Err(DigestError::EncodingInvalid(_))
    ));
    assert!(matches!(
        parse(&format!("sha512:{SHA256_EMPTY}")),
        Err(DigestError::EncodingInvalid(_))
    ));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_exclusivity() {
    assert!(matches!(
        register("sha256", Some(Arc::new(EncodeHex::new(64))), Some(hash::sha256)),
        Err(DigestError::AlgorithmExists(_))
    ));
    assert!(matches!(
        register("Sha256x", Some(Arc::new(EncodeHex::new(64))), Some(hash::sha256)),
        Err(DigestError::AlgorithmInvalidName(_))
    ));
    assert!(matches!(
        register("sha*", Some(Arc::new(EncodeHex::new(64))), Some(hash::sha256)),
        Err(DigestError::AlgorithmInvalidName(_))
    ));
}

#[test]
fn test_global_registration_is_visible_to_parse() {
    fn sha384() -> hash::HashState {
        Box::new(<sha2::Sha384 as Default>::default())
    }

    let alg = register(
        "sha384.integration",
        Some(Arc::new(EncodeHex::for_size(48))),
        Some(sha384),
    )
    .unwrap();
    assert_eq!(alg.size(), 48);
    assert_eq!(lookup("sha384.integration").unwrap(), alg);

    let d = alg.from_string("abc").unwrap();
    assert_eq!(d.encoded().len(), 96);
    assert_eq!(parse(&d.to_string()).unwrap(), d);
}

#[test]
fn test_isolated_registry() {
    let registry = Registry::new();
    assert!(matches!(
        registry.lookup("sha256"),
        Err(DigestError::AlgorithmUnknown(_))
    ));

    let seeded = Registry::with_builtins();
    let d = seeded
        .parse(&format!("sha256:{SHA256_EMPTY}"))
        .unwrap();
    assert_eq!(d, from_bytes(b"").unwrap());
}

// ============================================================================
// Pass-through Streams
// ============================================================================

#[test]
fn test_writer_pass_through() {
    for input in sample_inputs() {
        let mut sink = Vec::new();
        let mut w = Writer::new(&mut sink, &Algorithm::sha512());
        // Write in uneven pieces
        for piece in input.chunks(777) {
            w.write_all(piece).unwrap();
        }
        let d = w.digest().unwrap();
        assert_eq!(sink, input);
        assert_eq!(d, Algorithm::sha512().from_bytes(&input).unwrap());
    }
}

#[test]
fn test_reader_pass_through() {
    for input in sample_inputs() {
        let mut r = Reader::new(&input[..], &Algorithm::sha256());
        let mut out = Vec::new();
        let mut buf = [0u8; 333];
        loop {
            let n = r.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, input);
        assert!(r.verify(&from_bytes(&input).unwrap()));
    }
}

#[test]
fn test_reader_into_writer() {
    // Digest on both sides of a copy
    let input: Vec<u8> = (0..65_536).map(|i| (i * 31) as u8).collect();
    let mut r = Reader::new(&input[..], &Algorithm::sha256());
    let mut w = Writer::new(Vec::new(), &Algorithm::sha256());
    std::io::copy(&mut r, &mut w).unwrap();

    assert_eq!(r.digest().unwrap(), w.digest().unwrap());
    assert_eq!(w.into_inner().unwrap(), input);
}

#[test]
fn test_idempotent_finalize() {
    let mut w = Algorithm::sha256().digester().unwrap();
    w.write_all(b"some bytes").unwrap();
    assert_eq!(w.digest().unwrap(), w.digest().unwrap());
}

#[test]
fn test_uninitialized_vs_empty() {
    let empty = Writer::new(Vec::<u8>::new(), &Algorithm::sha256());
    assert_eq!(empty.digest().unwrap().encoded(), SHA256_EMPTY);

    let uninit: Writer<Vec<u8>> = Writer::default();
    assert!(matches!(uninit.digest(), Err(DigestError::WriterInvalid)));

    let uninit: Reader<&[u8]> = Reader::default();
    assert!(matches!(uninit.digest(), Err(DigestError::ReaderInvalid)));
}

#[test]
fn test_verify_semantics() {
    let mut w = Writer::new(Vec::new(), &Algorithm::sha256());
    w.write_all(b"{}").unwrap();

    assert!(!w.verify(&Digest::default()));
    assert!(!w.verify(&from_bytes(b"[]").unwrap()));
    assert!(w.verify(&parse(&format!("sha256:{SHA256_EMPTY_JSON}")).unwrap()));
}

// ============================================================================
// Serde
// ============================================================================

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Descriptor {
        #[serde(rename = "mediaType")]
        media_type: String,
        digest: Digest,
        size: u64,
    }

    #[test]
    fn test_json_round_trip() {
        let desc = Descriptor {
            media_type: "application/vnd.oci.empty.v1+json".to_string(),
            digest: from_string("{}").unwrap(),
            size: 2,
        };
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(
            json,
            format!(
                r#"{{"mediaType":"application/vnd.oci.empty.v1+json","digest":"sha256:{SHA256_EMPTY_JSON}","size":2}}"#
            )
        );

        let back: Descriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_json_zero_value() {
        let json = serde_json::to_string(&Digest::default()).unwrap();
        assert_eq!(json, r#""""#);
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert!(back.is_zero());
    }

    #[test]
    fn test_json_rejects_invalid() {
        for bad in [
            r#""sha256""#,
            r#""unknown:abcd""#,
            r#""sha256:abcd""#,
            r#"42"#,
        ] {
            assert!(
                serde_json::from_str::<Digest>(bad).is_err(),
                "{bad} should not deserialize"
            );
        }
    }
}
