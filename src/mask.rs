//! Frame masking utilities
//!
//! XOR of payload bytes with a repeating 4-byte key, applied in place.
//! The wide path works on 64-bit words (the key replicated twice) so the
//! compiler can vectorize it; the tail falls back to per-byte XOR.

use std::cell::Cell;

/// Apply a WebSocket mask in place.
///
/// Used both for masking (client writes) and unmasking (server reads).
/// XOR is its own inverse, so applying the same key twice restores the
/// original bytes.
#[inline]
pub fn apply_mask(data: &mut [u8], mask: [u8; 4]) {
    let word = u64::from_ne_bytes([
        mask[0], mask[1], mask[2], mask[3], mask[0], mask[1], mask[2], mask[3],
    ]);

    let mut chunks = data.chunks_exact_mut(8);
    for chunk in chunks.by_ref() {
        let mut w = [0u8; 8];
        w.copy_from_slice(chunk);
        let x = u64::from_ne_bytes(w) ^ word;
        chunk.copy_from_slice(&x.to_ne_bytes());
    }
    for (i, b) in chunks.into_remainder().iter_mut().enumerate() {
        *b ^= mask[i & 3];
    }
}

/// Rotate the mask key so the next byte to unmask lines up with `mask[0]`.
///
/// When a frame body spans reads, only `consumed mod 4` matters; the state
/// keeps the key pre-rotated instead of carrying a separate offset.
#[inline]
pub fn rotate_mask(offset: usize, mask: &mut [u8; 4]) {
    let original = *mask;
    mask[offset & 3] = original[0];
    mask[(offset + 1) & 3] = original[1];
    mask[(offset + 2) & 3] = original[2];
    mask[(offset + 3) & 3] = original[3];
}

thread_local! {
    static RNG_STATE: Cell<u64> = const { Cell::new(0) };
}

/// Generate a random 4-byte mask key for client frames.
///
/// xorshift64 over thread-local state, seeded from the clock on first
/// use. Mask keys do not need to be cryptographically secure; they only
/// have to be unpredictable enough to defeat proxy cache poisoning.
#[inline]
pub fn generate_mask() -> [u8; 4] {
    RNG_STATE.with(|state| {
        let mut s = state.get();
        if s == 0 {
            s = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64;
            s ^= &s as *const _ as u64;
        }

        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;

        state.set(s);
        (s as u32).to_ne_bytes()
    })
}
