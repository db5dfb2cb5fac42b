//! Fuzz target for webhook signature verification.
//!
//! Headers and payload are attacker-controlled; verification must handle
//! arbitrary delimiters, prefixes, and timestamps without panicking, and
//! an unsigned delivery must never be accepted.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_webhook_signature -- -max_total_time=600

#![no_main]

use arbitrary::Arbitrary;
use kadro_webhook::{SignatureHeaders, WebhookVerifier};
use libfuzzer_sys::fuzz_target;

const SECRET: &str = "whsec_fuzz_0123456789";

/// Arbitrary delivery input
#[derive(Arbitrary, Debug)]
struct DeliveryInput {
    event_id: String,
    timestamp: String,
    signatures: String,
    payload: Vec<u8>,
}

fuzz_target!(|input: DeliveryInput| {
    if input.event_id.len() > 500 || input.timestamp.len() > 100 || input.signatures.len() > 2000 {
        return;
    }

    let verifier = WebhookVerifier::new(SECRET).expect("non-empty secret");

    let headers = SignatureHeaders {
        event_id: input.event_id.clone(),
        timestamp: input.timestamp.clone(),
        signatures: input.signatures,
    };

    // Arbitrary signature candidates must never verify: the corpus does
    // not know the secret.
    if verifier.verify(&headers, &input.payload).is_ok() {
        panic!("unsigned delivery verified");
    }

    // A genuinely signed delivery over the same inputs verifies, provided
    // the fuzzed timestamp is current and numeric.
    let now = chrono::Utc::now().timestamp().to_string();
    let signed = SignatureHeaders {
        event_id: input.event_id.clone(),
        timestamp: now.clone(),
        signatures: verifier.sign(&input.event_id, &now, &input.payload),
    };
    assert!(verifier.verify(&signed, &input.payload).is_ok());
});
