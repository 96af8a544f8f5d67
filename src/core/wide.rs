/// UTF-16 output for surfaces that need 16-bit text (e.g. wide console APIs).
/// Produces data only; writing it anywhere is the caller's job.

use super::utf8::{decode, normalize, Codepoint};

/// One or two UTF-16 code units for a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideUnits {
    buf: [u16; 2],
    len: u8,
}

impl WideUnits {
    pub fn as_slice(&self) -> &[u16] {
        &self.buf[..self.len as usize]
    }
}

impl std::ops::Deref for WideUnits {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        self.as_slice()
    }
}

/// Encode `cp` as UTF-16. Values past U+10FFFF become U+FFFD.
/// Decoded surrogates below 0x10000 are emitted unchanged as a single unit.
pub fn encode_wide(cp: Codepoint) -> WideUnits {
    let cp = normalize(cp);
    if cp < 0x10000 {
        WideUnits { buf: [cp as u16, 0], len: 1 }
    } else {
        let v = cp - 0x10000;
        let high = 0xD800 | ((v >> 10) & 0x3FF) as u16;
        let low = 0xDC00 | (v & 0x3FF) as u16;
        WideUnits { buf: [high, low], len: 2 }
    }
}

/// Write the units for `cp` to the front of `out`, returning the unit count.
///
/// # Panics
/// If `out` cannot hold the units.
pub fn encode_wide_into(cp: Codepoint, out: &mut [u16]) -> usize {
    let units = encode_wide(cp);
    out[..units.len()].copy_from_slice(&units);
    units.len()
}

/// Exact number of UTF-16 units `widen` produces for `bytes`.
pub fn wide_len(bytes: &[u8]) -> usize {
    let mut offset = 0;
    let mut units = 0;
    while let Some((cp, consumed)) = decode(bytes, offset) {
        units += encode_wide(cp).len();
        offset += consumed;
    }
    units
}

/// Convert UTF-8 to UTF-16, one decoded codepoint at a time.
pub fn widen(bytes: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(bytes.len() + 1);
    let mut offset = 0;
    while let Some((cp, consumed)) = decode(bytes, offset) {
        out.extend_from_slice(&encode_wide(cp));
        offset += consumed;
    }
    out
}

/// Widen into a caller-owned buffer. No terminator is written; size `out` as
/// `wide_len(bytes) + 1` to leave room for one. Stops before the first
/// codepoint that does not fit and returns the units written.
pub fn widen_into(bytes: &[u8], out: &mut [u16]) -> usize {
    let mut offset = 0;
    let mut written = 0;
    while let Some((cp, consumed)) = decode(bytes, offset) {
        let needed = encode_wide(cp).len();
        let Some(dst) = out.get_mut(written..written + needed) else { break };
        written += encode_wide_into(cp, dst);
        offset += consumed;
    }
    written
}

/// Widen NUL-terminated text: everything before the first zero byte,
/// or the whole slice if there is none.
pub fn widen_terminated(bytes: &[u8]) -> Vec<u16> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    widen(&bytes[..end])
}

/// Text as it would reach a wide-character console: widened, then read back.
/// Malformed input and lone surrogates show as U+FFFD.
pub fn show(bytes: &[u8]) -> String {
    String::from_utf16_lossy(&widen(bytes))
}
