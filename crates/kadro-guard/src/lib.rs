//! kadro Guard Library
//!
//! The tenant authorization gate: authenticates every protected request,
//! attaches verified identity and organization context, and rejects
//! cross-tenant resource access.
//!
//! Row-level tenant filtering of domain queries is deliberately out of
//! scope: that guarantee is structural and belongs to each domain
//! service's query layer. The gate guarantees only that a request cannot
//! claim to act on a different organization's explicit identifier.

pub mod context;
pub mod error;
pub mod gate;
pub mod resource;

pub use context::AuthContext;
pub use error::{ErrorResponse, GuardError};
pub use gate::{auth_gate, bearer_token, GateState};
pub use resource::{confirm_resource_org, resource_org_guard, ORG_PARAM};
