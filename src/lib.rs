//! # wswire: streaming WebSocket frame codec
//!
//! An RFC 6455 frame parser and framer built for transports that read
//! into reusable buffers:
//!
//! - **Zero allocation on the parse path**: payloads are unmasked in
//!   place and delivered as slices of the receive buffer; headers split
//!   across reads are staged in a fixed spill area inside the
//!   per-connection state.
//! - **Role-generic**: `WsState<true>` parses masked client frames on a
//!   server, `WsState<false>` parses server frames on a client; header
//!   sizes and unmask paths are monomorphized per role.
//! - **Callback driven**: owners implement [`FrameHandler`] to receive
//!   fragments, police payload sizes, answer compression negotiation,
//!   and learn about protocol violations. A ready-made
//!   [`MessageAssembler`] turns fragments into whole [`Message`]s.
//!
//! The TCP/TLS transport, HTTP upgrade handshake, permessage-deflate
//! engine and timers live outside this crate; the parser talks to them
//! only through the handler contract and the buffer layout documented on
//! [`WsState::consume`].
//!
//! ## Example
//!
//! ```
//! use wswire::{Config, Message, MessageAssembler, ServerState, RecvBuffer};
//!
//! let mut state = ServerState::new();
//! let mut buffer = RecvBuffer::<true>::default();
//! let mut assembler: MessageAssembler<true> = MessageAssembler::new(Config::default(), |msg: Message| {
//!     if let Some(text) = msg.as_text() {
//!         println!("got: {}", text);
//!     }
//!     false // keep parsing
//! });
//!
//! // Masked "Hello" text frame, as a client would send it.
//! let wire = [0x81, 0x85, 0x37, 0xFA, 0x21, 0x3D, 0x7F, 0x9F, 0x4D, 0x51, 0x58];
//! buffer.space_mut()[..wire.len()].copy_from_slice(&wire);
//! buffer.consume(wire.len(), &mut state, &mut assembler);
//! assert!(assembler.error().is_none());
//! ```

pub mod buffer;
pub mod callback;
pub mod close;
pub mod error;
pub mod frame;
pub mod mask;
pub mod message;
pub mod parser;
pub mod utf8;

pub use buffer::RecvBuffer;
pub use callback::Callback;
pub use close::CloseFrame;
pub use error::{Error, Result};
pub use frame::{format_message, message_frame_size, OpCode};
pub use message::{CloseReason, Message, MessageAssembler};
pub use parser::{ClientState, FrameHandler, ServerState, WsState};

/// Default receive buffer capacity (64KB for high throughput)
pub const RECV_BUFFER_SIZE: usize = 64 * 1024;

/// Largest payload encodable with the 2-byte frame header
pub const SHORT_PAYLOAD_THRESHOLD: usize = 125;

/// Largest payload encodable with the 16-bit extended length
pub const MEDIUM_PAYLOAD_THRESHOLD: usize = 65535;

/// Limits applied while parsing and assembling messages
///
/// # Example
///
/// ```
/// use wswire::Config;
///
/// let config = Config::builder()
///     .max_payload_length(16 * 1024)
///     .max_message_size(1024 * 1024)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum declared length of a single frame; larger frames are
    /// refused before their payload is dispatched (default: 16MB)
    pub max_payload_length: usize,
    /// Maximum size of an assembled multi-fragment message (default: 64MB)
    pub max_message_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload_length: 16 * 1024 * 1024,
            max_message_size: 64 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the per-frame payload length limit
    pub fn max_payload_length(mut self, size: usize) -> Self {
        self.config.max_payload_length = size;
        self
    }

    /// Set the assembled message size limit
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::frame::OpCode;
    pub use crate::message::{CloseReason, Message, MessageAssembler};
    pub use crate::parser::{ClientState, FrameHandler, ServerState, WsState};
    pub use crate::Config;
}
