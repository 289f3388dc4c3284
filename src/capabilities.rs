//! Capability seams for the command layer: authorization, notification, and
//! text generation. The core service takes no dependency on these; the
//! command surface composes them around core calls.

use crate::models::UserId;

/// Decides whether a caller may invoke mutating operations.
pub trait Authorizer {
    fn is_permitted(&self, caller: Option<UserId>, token: Option<&str>) -> bool;
}

/// Delivers out-of-band messages (announcements, audit lines).
pub trait Notifier {
    fn send(&self, message: &str);
}

/// Optional free-text assistant (e.g. round summaries).
pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> String;
}
