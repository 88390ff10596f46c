//! Shared helpers for integration tests
#![allow(dead_code)]

use wswire::{FrameHandler, OpCode, WsState};

/// One `handle_fragment` call, as observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub data: Vec<u8>,
    pub remaining: u64,
    pub opcode: OpCode,
    pub fin: bool,
}

/// A frame-level event: consecutive fragments of one frame coalesced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEvent {
    pub opcode: OpCode,
    pub fin: bool,
    pub payload: Vec<u8>,
}

#[derive(Default)]
pub struct Recorder {
    pub fragments: Vec<Fragment>,
    pub closed: Option<&'static str>,
    pub compression: bool,
}

impl<const S: bool> FrameHandler<S> for Recorder {
    fn set_compressed(&mut self, _state: &mut WsState<S>) -> bool {
        self.compression
    }

    fn handle_fragment(
        &mut self,
        data: &[u8],
        remaining_bytes: u64,
        opcode: OpCode,
        fin: bool,
        _state: &mut WsState<S>,
    ) -> bool {
        self.fragments.push(Fragment {
            data: data.to_vec(),
            remaining: remaining_bytes,
            opcode,
            fin,
        });
        false
    }

    fn force_close(&mut self, _state: &mut WsState<S>, reason: &'static str) {
        self.closed = Some(reason);
    }
}

impl Recorder {
    /// Coalesce per-read fragments back into frame-level events.
    pub fn frame_events(&self) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        let mut acc: Vec<u8> = Vec::new();
        for frag in &self.fragments {
            acc.extend_from_slice(&frag.data);
            if frag.remaining == 0 {
                events.push(FrameEvent {
                    opcode: frag.opcode,
                    fin: frag.fin,
                    payload: std::mem::take(&mut acc),
                });
            }
        }
        assert!(acc.is_empty(), "stream ended inside a frame body");
        events
    }
}

/// Feed `data` through a padded buffer, as a transport read would.
pub fn feed<const S: bool, H: FrameHandler<S>>(
    state: &mut WsState<S>,
    handler: &mut H,
    data: &[u8],
) {
    let pre = WsState::<S>::CONSUME_PRE_PADDING;
    let post = WsState::<S>::CONSUME_POST_PADDING;
    let mut buf = vec![0u8; pre + data.len() + post];
    buf[pre..pre + data.len()].copy_from_slice(data);
    state.consume(&mut buf, data.len(), handler);
}
