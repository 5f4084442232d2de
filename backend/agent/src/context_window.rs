//! Context clamping for outbound requests.
//!
//! Applied to what is *sent* to the model, never to the stored
//! transcript: session history stays append-only and untruncated.

use salamgate_core::Message;

/// Return the most recent `max_messages` entries of the history.
pub fn clamp_context(history: &[Message], max_messages: usize) -> &[Message] {
    if history.len() <= max_messages {
        history
    } else {
        &history[history.len() - max_messages..]
    }
}
