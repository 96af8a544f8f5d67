/// Codepoint-indexed string operations: length, substring, reverse.
/// Positions are never stored; each call rescans from the start of the slice.

use crate::core::{decode, encode_into, size, Codepoint};

/// One decoded codepoint and where it sits in the source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub offset: usize,
    pub codepoint: Codepoint,
    /// Bytes consumed from the source.
    pub len: usize,
}

/// Iterator over the codepoints of a byte slice. Every byte belongs to exactly
/// one yielded unit; malformed sequences come out as U+FFFD.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Iterator for Codepoints<'_> {
    type Item = Unit;

    fn next(&mut self) -> Option<Unit> {
        let (codepoint, len) = decode(self.bytes, self.offset)?;
        let unit = Unit { offset: self.offset, codepoint, len };
        self.offset += len;
        Some(unit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.bytes.len().saturating_sub(self.offset);
        (rest.div_ceil(4), Some(rest))
    }
}

pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints { bytes, offset: 0 }
}

/// Number of codepoints. Each malformed sequence counts as one.
pub fn length(bytes: &[u8]) -> usize {
    if bytes.is_empty() {
        return 0;
    }
    codepoints(bytes).count()
}

/// Codepoint-indexed substring with 1-based inclusive bounds.
/// Negative bounds count from the end: -1 is the last codepoint.
///
/// Bounds are clamped: a start before the first codepoint begins at the first,
/// an end past the last stops at the last, and a start past the last
/// codepoint yields an empty slice.
pub fn substring(bytes: &[u8], start: i64, end: i64) -> &[u8] {
    let (start, end) = if start >= 0 && end >= 0 {
        (start - 1, end - 1)
    } else {
        let len = length(bytes) as i64;
        (
            if start >= 0 { start - 1 } else { len + start },
            if end >= 0 { end - 1 } else { len + end },
        )
    };
    let start = start.max(0);
    if start > end {
        return &[];
    }

    let mut from = None;
    let mut to = bytes.len();
    for (i, unit) in codepoints(bytes).enumerate() {
        let i = i as i64;
        if i == start {
            from = Some(unit.offset);
        }
        if i == end {
            to = unit.offset + unit.len;
            break;
        }
    }
    match from {
        Some(from) => &bytes[from..to],
        None => &[],
    }
}

/// `substring(bytes, start, -1)`: everything from `start` on.
pub fn sub(bytes: &[u8], start: i64) -> &[u8] {
    substring(bytes, start, -1)
}

/// Reverse codepoint order, keeping the bytes inside each codepoint in order.
/// Output has the same byte length as the input. Sequences whose consumed
/// length differs from their re-encoded size (lone bytes, broken or overlong
/// sequences) are copied through raw; everything else is re-encoded.
pub fn reverse(bytes: &[u8]) -> Vec<u8> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u8; bytes.len()];
    let mut cursor = out.len();
    for unit in codepoints(bytes) {
        let at = cursor - unit.len;
        if size(unit.codepoint) == unit.len {
            encode_into(unit.codepoint, &mut out[at..cursor]);
        } else {
            out[at..cursor].copy_from_slice(&bytes[unit.offset..unit.offset + unit.len]);
        }
        cursor = at;
    }
    out
}
