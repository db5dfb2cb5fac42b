//! Employee code generation.
//!
//! Codes are human-readable and collision-resistant: a fixed prefix, six
//! time-derived digits, and four random digits. Uniqueness is ultimately
//! enforced by the database constraint; the engine retries generation a
//! bounded number of times on collision.

use chrono::Utc;
use rand::Rng;

/// Fixed prefix for every employee code.
pub const EMPLOYEE_CODE_PREFIX: &str = "EMP";

/// Generate a candidate employee code, e.g. `EMP4821937204`.
#[must_use]
pub fn generate_employee_code() -> String {
    let time_digits = Utc::now().timestamp() % 1_000_000;
    let random_digits: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{EMPLOYEE_CODE_PREFIX}{time_digits:06}{random_digits:04}")
}
