//! Error types and the static close reasons reported through `force_close`

use std::fmt;

/// Frame or message exceeded the negotiated size limit.
pub const ERR_TOO_BIG_MESSAGE: &str = "Received too big message";
/// Connection was idle past its timeout window.
pub const ERR_WEBSOCKET_TIMEOUT: &str = "WebSocket timed out from inactivity";
/// A completed Text message failed UTF-8 validation.
pub const ERR_INVALID_TEXT: &str = "Received invalid UTF-8";
/// Decompressed size overflow or inflater failure.
pub const ERR_TOO_BIG_MESSAGE_INFLATION: &str = "Received too big message, or other inflation error";
/// Close frame carried an illegal status code or a non-UTF-8 reason.
pub const ERR_INVALID_CLOSE_PAYLOAD: &str = "Received invalid close payload";
/// Malformed header, reserved opcode, bad RSV bits, or fragmentation-order violation.
pub const ERR_PROTOCOL: &str = "Received invalid WebSocket frame";
/// Transport reported EOF before a WebSocket Close frame arrived.
pub const ERR_TCP_FIN: &str = "Received TCP FIN before WebSocket close frame";

/// Result type alias for fallible wswire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal connection errors surfaced by the message layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Protocol violation (malformed frame, bad fragmentation order)
    Protocol(&'static str),
    /// Invalid UTF-8 in a text message
    InvalidUtf8,
    /// Frame or assembled message too large
    MessageTooLarge,
    /// Close frame payload failed validation
    InvalidClosePayload,
    /// Peer vanished without a close handshake
    AbnormalClosure(&'static str),
}

impl Error {
    /// Map a `force_close` reason back to a typed error.
    pub fn from_close_reason(reason: &'static str) -> Self {
        if reason == ERR_TOO_BIG_MESSAGE || reason == ERR_TOO_BIG_MESSAGE_INFLATION {
            Error::MessageTooLarge
        } else if reason == ERR_INVALID_TEXT {
            Error::InvalidUtf8
        } else if reason == ERR_INVALID_CLOSE_PAYLOAD {
            Error::InvalidClosePayload
        } else if reason == ERR_TCP_FIN || reason == ERR_WEBSOCKET_TIMEOUT {
            Error::AbnormalClosure(reason)
        } else {
            Error::Protocol(reason)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Protocol(msg) => write!(f, "protocol error: {}", msg),
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 in text message"),
            Error::MessageTooLarge => write!(f, "message too large"),
            Error::InvalidClosePayload => write!(f, "invalid close payload"),
            Error::AbnormalClosure(msg) => write!(f, "abnormal closure: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
