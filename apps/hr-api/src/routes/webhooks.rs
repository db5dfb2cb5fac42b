//! Inbound identity-provider webhook endpoint.
//!
//! The signature covers the exact transmitted bytes, so the body is taken
//! raw and verified before any parsing. Providers retry on non-2xx:
//! signature failures are 401, processing failures are 500, and everything
//! handled (including idempotent no-ops and ignored event types) is 200.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kadro_provisioning::{EventOutcome, WebhookEvent};
use kadro_webhook::{HEADER_EVENT_ID, HEADER_SIGNATURE, HEADER_TIMESTAMP, SignatureHeaders};

use crate::state::AppState;

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// `POST /webhooks/identity`
pub async fn receive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let signature_headers = match SignatureHeaders::from_parts(
        header(&headers, HEADER_EVENT_ID),
        header(&headers, HEADER_TIMESTAMP),
        header(&headers, HEADER_SIGNATURE),
    ) {
        Ok(h) => h,
        Err(err) => {
            tracing::warn!(error = %err, "rejected webhook delivery");
            return (StatusCode::UNAUTHORIZED, err.to_string()).into_response();
        }
    };

    if let Err(err) = state.verifier.verify(&signature_headers, &body) {
        tracing::warn!(
            event_id = %signature_headers.event_id,
            error = %err,
            "rejected webhook delivery"
        );
        return (StatusCode::UNAUTHORIZED, err.to_string()).into_response();
    }

    let event = match WebhookEvent::parse(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(
                event_id = %signature_headers.event_id,
                error = %err,
                "rejected malformed webhook envelope"
            );
            return (StatusCode::BAD_REQUEST, "malformed event envelope").into_response();
        }
    };

    let event_type = event.event_type.clone();
    match state.engine.handle_event(event).await {
        Ok(outcome) => {
            log_outcome(&signature_headers.event_id, &event_type, &outcome);
            StatusCode::OK.into_response()
        }
        Err(err) => {
            tracing::error!(
                event_id = %signature_headers.event_id,
                event_type = %event_type,
                error = %err,
                "webhook event processing failed"
            );
            // Coarse on purpose: the provider learns only that processing
            // failed, and the distinct failure reasons stay in our logs.
            (StatusCode::INTERNAL_SERVER_ERROR, "event processing failed").into_response()
        }
    }
}

fn log_outcome(event_id: &str, event_type: &str, outcome: &EventOutcome) {
    match outcome {
        EventOutcome::Created(user) => {
            tracing::info!(event_id, event_type, user_id = %user.id, "user provisioned");
        }
        EventOutcome::Updated(user) => {
            tracing::info!(event_id, event_type, user_id = %user.id, "user profile updated");
        }
        EventOutcome::Terminated(user) => {
            tracing::info!(event_id, event_type, user_id = %user.id, "user terminated");
        }
        EventOutcome::NoOp => {
            tracing::debug!(event_id, event_type, "event referenced no provisioned user");
        }
        EventOutcome::Ignored => {
            tracing::debug!(event_id, event_type, "unrecognized event type ignored");
        }
    }
}
