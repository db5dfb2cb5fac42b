//! Fuzz target for webhook event envelope and external user decoding.
//!
//! The envelope and the provider's user payload are parsed from raw bytes
//! that already passed signature verification, but the provider's schema
//! is not under our control; decoding must never panic.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_event_envelope -- -max_total_time=600

#![no_main]

use kadro_provisioning::{ExternalUser, WebhookEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(event) = WebhookEvent::parse(data) {
        // The type survives as-is; the data payload may be anything.
        let _ = event.event_type.len();

        if let Ok(user) = serde_json::from_value::<ExternalUser>(event.data) {
            // Field resolution over arbitrary content must not panic.
            let _ = user.primary_email();
            let _ = user.primary_phone();
            let _ = user.organization_id();
            let _ = user.subject_id();
        }
    }
});
