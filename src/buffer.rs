//! Padded receive buffer
//!
//! [`WsState::consume`] requires writable slack around the received
//! bytes: `CONSUME_PRE_PADDING` leading bytes where spilled header bytes
//! are prepended, and `CONSUME_POST_PADDING` trailing bytes. `RecvBuffer`
//! owns a slab with that layout so transports do not hand-compute
//! offsets.

use crate::parser::{FrameHandler, WsState};
use crate::RECV_BUFFER_SIZE;

/// A receive buffer satisfying the parser's padding contract.
pub struct RecvBuffer<const IS_SERVER: bool> {
    buf: Box<[u8]>,
}

impl<const IS_SERVER: bool> RecvBuffer<IS_SERVER> {
    /// Allocate a buffer able to hold `capacity` received bytes.
    pub fn new(capacity: usize) -> Self {
        let total = WsState::<IS_SERVER>::CONSUME_PRE_PADDING
            + capacity
            + WsState::<IS_SERVER>::CONSUME_POST_PADDING;
        Self {
            buf: vec![0u8; total].into_boxed_slice(),
        }
    }

    /// Received bytes the buffer can hold per read.
    pub fn capacity(&self) -> usize {
        self.buf.len()
            - WsState::<IS_SERVER>::CONSUME_PRE_PADDING
            - WsState::<IS_SERVER>::CONSUME_POST_PADDING
    }

    /// The region the transport fills with network bytes.
    pub fn space_mut(&mut self) -> &mut [u8] {
        let pre = WsState::<IS_SERVER>::CONSUME_PRE_PADDING;
        let cap = self.capacity();
        &mut self.buf[pre..pre + cap]
    }

    /// Parse the first `len` received bytes in [`space_mut`](Self::space_mut).
    pub fn consume<H: FrameHandler<IS_SERVER>>(
        &mut self,
        len: usize,
        state: &mut WsState<IS_SERVER>,
        handler: &mut H,
    ) {
        assert!(len <= self.capacity(), "len exceeds buffer capacity");
        state.consume(&mut self.buf, len, handler);
    }
}

impl<const IS_SERVER: bool> Default for RecvBuffer<IS_SERVER> {
    fn default() -> Self {
        Self::new(RECV_BUFFER_SIZE)
    }
}
