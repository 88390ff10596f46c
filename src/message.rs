//! Message assembly on top of the frame parser
//!
//! The parser deals in fragments; most owners want whole messages. This
//! module provides [`Message`], [`CloseReason`], and [`MessageAssembler`],
//! a [`FrameHandler`] that reassembles fragmented messages, buffers split
//! control frames, parses Close payloads, and validates Text UTF-8 once
//! the final fragment lands. Completed messages are delivered through a
//! stored [`Callback`].

use bytes::{Bytes, BytesMut};
use log::debug;

use crate::callback::Callback;
use crate::close::{parse_close_payload, CLOSE_CODE_NONE};
use crate::error::{Error, ERR_INVALID_TEXT, ERR_TOO_BIG_MESSAGE};
use crate::frame::OpCode;
use crate::parser::{FrameHandler, WsState};
use crate::utf8::is_valid_utf8;
use crate::Config;

/// Close status code plus optional reason text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReason {
    /// Close status code
    pub code: u16,
    /// Reason string (validated UTF-8)
    pub reason: String,
}

impl CloseReason {
    /// Create a new close reason
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

/// A complete WebSocket message, possibly assembled from fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text message (UTF-8 validated)
    Text(Bytes),
    /// Binary message
    Binary(Bytes),
    /// Ping with its payload
    Ping(Bytes),
    /// Pong with its payload
    Pong(Bytes),
    /// Close, with the parsed reason when one was present
    Close(Option<CloseReason>),
}

impl Message {
    /// Check if this is a control message
    #[inline]
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Message::Ping(_) | Message::Pong(_) | Message::Close(_)
        )
    }

    /// Check if this is a close message
    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self, Message::Close(_))
    }

    /// Message payload bytes (empty for Close)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Message::Text(b) | Message::Binary(b) | Message::Ping(b) | Message::Pong(b) => b,
            Message::Close(_) => &[],
        }
    }

    /// Text content, for Text messages only.
    ///
    /// Zero-copy; the payload was UTF-8 validated during assembly.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            // SAFETY: Text payloads are validated before emission
            Message::Text(b) => Some(unsafe { std::str::from_utf8_unchecked(b) }),
            _ => None,
        }
    }
}

/// Reassembles parser fragments into [`Message`]s.
///
/// Implements the handler obligations the parser leaves to its owner:
/// fragmented data messages are buffered until FIN and Text payloads are
/// UTF-8 validated at that point; control frames whose bodies were split
/// across reads are stitched back together; Close payloads go through
/// the close codec. Each completed message is handed to the `on_message`
/// callback, whose `true` return stops parsing.
///
/// Compression is not negotiated by this assembler; frames with RSV1 set
/// are protocol errors. Owners speaking permessage-deflate implement
/// [`FrameHandler`] directly.
pub struct MessageAssembler<const IS_SERVER: bool> {
    config: Config,
    fragment_buf: BytesMut,
    assembling: Option<OpCode>,
    control_buf: BytesMut,
    on_message: Callback<Message, bool>,
    error: Option<Error>,
}

impl<const IS_SERVER: bool> MessageAssembler<IS_SERVER> {
    /// Create an assembler delivering messages to `on_message`.
    pub fn new<F>(config: Config, on_message: F) -> Self
    where
        F: FnMut(Message) -> bool + 'static,
    {
        Self {
            config,
            fragment_buf: BytesMut::new(),
            assembling: None,
            control_buf: BytesMut::new(),
            on_message: Callback::new(on_message),
            error: None,
        }
    }

    /// The terminal error recorded for this connection, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Take the terminal error, leaving the assembler clear.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    fn emit(&mut self, msg: Message) -> bool {
        self.on_message.call(msg)
    }

    fn fail(&mut self, error: Error) -> bool {
        debug!("message assembly failed: {}", error);
        self.error = Some(error);
        true
    }

    fn handle_control(&mut self, data: &[u8], remaining_bytes: u64, opcode: OpCode) -> bool {
        // A control body can be split across reads even though it is
        // never fragmented at the frame level.
        if remaining_bytes > 0 || !self.control_buf.is_empty() {
            self.control_buf.extend_from_slice(data);
            if remaining_bytes > 0 {
                return false;
            }
        }
        let payload = if self.control_buf.is_empty() {
            Bytes::copy_from_slice(data)
        } else {
            self.control_buf.split().freeze()
        };

        match opcode {
            OpCode::Ping => self.emit(Message::Ping(payload)),
            OpCode::Pong => self.emit(Message::Pong(payload)),
            _ => {
                let close = parse_close_payload(&payload);
                if close.is_invalid() {
                    self.error = Some(Error::InvalidClosePayload);
                }
                let reason = if close.code == CLOSE_CODE_NONE {
                    None
                } else {
                    Some(CloseReason::new(
                        close.code,
                        String::from_utf8_lossy(close.message).into_owned(),
                    ))
                };
                self.emit(Message::Close(reason));
                // The close handshake ends the read side either way.
                true
            }
        }
    }

    fn handle_data(&mut self, data: &[u8], remaining_bytes: u64, opcode: OpCode, fin: bool) -> bool {
        let completes = fin && remaining_bytes == 0;

        if completes && self.assembling.is_none() && self.fragment_buf.is_empty() {
            // Unfragmented message contained in one read.
            if opcode == OpCode::Text && !is_valid_utf8(data) {
                return self.fail(Error::from_close_reason(ERR_INVALID_TEXT));
            }
            let payload = Bytes::copy_from_slice(data);
            return self.emit(if opcode == OpCode::Text {
                Message::Text(payload)
            } else {
                Message::Binary(payload)
            });
        }

        if self.fragment_buf.len() + data.len() > self.config.max_message_size {
            return self.fail(Error::from_close_reason(ERR_TOO_BIG_MESSAGE));
        }
        if self.assembling.is_none() {
            self.assembling = Some(opcode);
        }
        self.fragment_buf.extend_from_slice(data);

        if !completes {
            return false;
        }

        let opcode = self.assembling.take().unwrap_or(opcode);
        let payload = self.fragment_buf.split().freeze();
        if opcode == OpCode::Text && !is_valid_utf8(&payload) {
            return self.fail(Error::from_close_reason(ERR_INVALID_TEXT));
        }
        self.emit(if opcode == OpCode::Text {
            Message::Text(payload)
        } else {
            Message::Binary(payload)
        })
    }
}

impl<const IS_SERVER: bool> FrameHandler<IS_SERVER> for MessageAssembler<IS_SERVER> {
    fn refuse_payload_length(&mut self, payload_len: u64, _state: &mut WsState<IS_SERVER>) -> bool {
        payload_len > self.config.max_payload_length as u64
    }

    fn handle_fragment(
        &mut self,
        data: &[u8],
        remaining_bytes: u64,
        opcode: OpCode,
        fin: bool,
        _state: &mut WsState<IS_SERVER>,
    ) -> bool {
        if opcode.is_control() {
            self.handle_control(data, remaining_bytes, opcode)
        } else {
            self.handle_data(data, remaining_bytes, opcode, fin)
        }
    }

    fn force_close(&mut self, _state: &mut WsState<IS_SERVER>, reason: &'static str) {
        debug!("connection force-closed: {}", reason);
        self.error = Some(Error::from_close_reason(reason));
    }
}
