//! Fuzz target for the canonical batch decoder.
//!
//! The decoder must never panic, and anything it accepts must re-encode to
//! exactly the input bytes.
//!
//! ## Running
//!
//! ```bash
//! cd crates/alert-batch
//! cargo +nightly fuzz run fuzz_decode_batch
//! ```

#![no_main]

use alert_batch::domain::encoding::{decode, encode, ENCODING_VERSION};
use alert_batch::BatchConfig;
use libfuzzer_sys::fuzz_target;

/// Fuzz input: small limits exercise the limit checks as well.
#[derive(Debug, arbitrary::Arbitrary)]
struct DecodeFuzzInput {
    /// Body following the version byte
    body: Vec<u8>,
    /// Use the production limits or tight ones
    tight_limits: bool,
}

fuzz_target!(|input: DecodeFuzzInput| {
    let config = if input.tight_limits {
        BatchConfig {
            max_string_len: 16,
            max_payload_len: 16,
            max_signature_len: 16,
            max_sequence_len: 4,
            ..BatchConfig::default()
        }
    } else {
        BatchConfig::default()
    };

    // Prefix the version so most inputs reach the body parser
    let mut bytes = Vec::with_capacity(input.body.len() + 1);
    bytes.push(ENCODING_VERSION);
    bytes.extend_from_slice(&input.body);

    if let Ok(batch) = decode(&bytes, &config) {
        let reencoded = encode(&batch, &config).expect("decoded batch must encode");
        assert_eq!(reencoded, bytes);
    }
});
