//! Session-level error policy.
//!
//! One request failure carries cross-cutting meaning: the backend answering
//! "access denied" means the stored token is stale, and keeping it would
//! trap the user in a loop of failing requests. That single message clears
//! the token so the surrounding application falls back to its login flow.
//! Every other message is the caller's problem to display.

use log::warn;

use super::update;

const ACCESS_DENIED: &str = "access denied";

/// Inspects a request error message and invalidates the stored token when
/// the backend denied access. Returns whether the token was cleared.
pub fn handle_request_error(message: &str) -> bool {
    if !message.trim().eq_ignore_ascii_case(ACCESS_DENIED) {
        return false;
    }
    warn!("backend denied access, clearing stored token");
    update(|state| state.token.clear());
    true
}
