//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the text that was sent to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no reply was sent.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain; the reply has been sent.
    Reply(String),
}
