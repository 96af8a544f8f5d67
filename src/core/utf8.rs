/// UTF-8 codepoint codec over bounded byte slices.
/// Malformed input never fails: it decodes to U+FFFD.

use crate::error::MalformedSequence;

/// A Unicode codepoint. Not `char`: decoded surrogates pass through unchanged.
pub type Codepoint = u32;

pub const REPLACEMENT: Codepoint = 0xFFFD;
pub const MAX_CODEPOINT: Codepoint = 0x10FFFF;

/// Map anything past U+10FFFF to U+FFFD.
#[inline]
pub fn normalize(cp: Codepoint) -> Codepoint {
    if cp > MAX_CODEPOINT { REPLACEMENT } else { cp }
}

/// Decode the codepoint starting at byte `offset`.
/// Returns the codepoint and the number of bytes consumed, or None at end of input.
///
/// - A continuation or 0xF8..=0xFF byte in leading position consumes 1 byte.
/// - A broken continuation consumes up to and including the bad byte.
/// - A sequence cut off by the end of the slice consumes what is there.
/// - Overlong and out-of-range values consume the full sequence.
///
/// All four yield U+FFFD.
pub fn decode(bytes: &[u8], offset: usize) -> Option<(Codepoint, usize)> {
    let lead = *bytes.get(offset)?;
    let (mut cp, extra, min) = match lead {
        0x00..=0x7F => return Some((lead as Codepoint, 1)),
        0x80..=0xBF | 0xF8..=0xFF => return Some((REPLACEMENT, 1)),
        0xC0..=0xDF => ((lead & 0x1F) as Codepoint, 1, 0x80),
        0xE0..=0xEF => ((lead & 0x0F) as Codepoint, 2, 0x800),
        0xF0..=0xF7 => ((lead & 0x07) as Codepoint, 3, 0x10000),
    };
    for i in 1..=extra {
        match bytes.get(offset + i) {
            Some(&b) if b & 0xC0 == 0x80 => cp = (cp << 6) | (b & 0x3F) as Codepoint,
            Some(_) => return Some((REPLACEMENT, i + 1)),
            None => return Some((REPLACEMENT, i)),
        }
    }
    if cp < min || cp > MAX_CODEPOINT {
        cp = REPLACEMENT;
    }
    Some((cp, extra + 1))
}

/// Result of strict decoding: either a well-formed scalar value or the raw bytes
/// that lenient decoding would have replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded<'a> {
    Valid(Codepoint),
    Malformed(&'a [u8]),
}

impl Decoded<'_> {
    /// The codepoint lenient decoding reports for this sequence.
    pub fn codepoint(&self) -> Codepoint {
        match self {
            Decoded::Valid(cp) => *cp,
            Decoded::Malformed(_) => REPLACEMENT,
        }
    }

    /// Bytes consumed.
    pub fn len(&self) -> usize {
        match self {
            Decoded::Valid(cp) => size(*cp),
            Decoded::Malformed(raw) => raw.len(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Decoded::Valid(_))
    }
}

/// Like [`decode`], but tells genuine U+FFFD apart from substituted input.
/// Encoded surrogates (U+D800..U+DFFF) count as malformed here.
pub fn decode_strict(bytes: &[u8], offset: usize) -> Option<Decoded<'_>> {
    let (cp, len) = decode(bytes, offset)?;
    let raw = &bytes[offset..offset + len];
    let surrogate = (0xD800..=0xDFFF).contains(&cp);
    if !surrogate && encode(cp).as_bytes() == raw {
        Some(Decoded::Valid(cp))
    } else {
        Some(Decoded::Malformed(raw))
    }
}

/// Check that `bytes` is well-formed UTF-8, reporting the first bad sequence.
pub fn validate(bytes: &[u8]) -> Result<(), MalformedSequence> {
    let mut offset = 0;
    while let Some(decoded) = decode_strict(bytes, offset) {
        if let Decoded::Malformed(raw) = decoded {
            log::debug!("malformed sequence {:02x?} at byte {}", raw, offset);
            return Err(MalformedSequence { offset, bytes: raw.to_vec() });
        }
        offset += decoded.len();
    }
    Ok(())
}

/// Number of bytes `encode` produces for `cp`.
pub fn size(cp: Codepoint) -> usize {
    let cp = normalize(cp);
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x10000 {
        3
    } else {
        4
    }
}

/// Byte size of the codepoint decoded at `offset`; 0 past the end.
/// Malformed input reports the size of U+FFFD.
pub fn size_at(bytes: &[u8], offset: usize) -> usize {
    decode(bytes, offset).map_or(0, |(cp, _)| size(cp))
}

/// UTF-8 encoding of a single codepoint, held inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedUtf8 {
    buf: [u8; 4],
    len: u8,
}

impl EncodedUtf8 {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl std::ops::Deref for EncodedUtf8 {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

pub fn encode(cp: Codepoint) -> EncodedUtf8 {
    let mut buf = [0u8; 4];
    let len = encode_into(cp, &mut buf);
    EncodedUtf8 { buf, len: len as u8 }
}

/// Write the encoding of `cp` to the front of `out`, returning the byte count.
///
/// # Panics
/// If `out` is shorter than `size(cp)`.
pub fn encode_into(cp: Codepoint, out: &mut [u8]) -> usize {
    let cp = normalize(cp);
    let len = size(cp);
    match len {
        1 => out[0] = cp as u8,
        2 => {
            out[0] = (0xC0 | (cp >> 6) & 0x1F) as u8;
            out[1] = (0x80 | cp & 0x3F) as u8;
        }
        3 => {
            out[0] = (0xE0 | (cp >> 12) & 0x0F) as u8;
            out[1] = (0x80 | (cp >> 6) & 0x3F) as u8;
            out[2] = (0x80 | cp & 0x3F) as u8;
        }
        _ => {
            out[0] = (0xF0 | (cp >> 18) & 0x07) as u8;
            out[1] = (0x80 | (cp >> 12) & 0x3F) as u8;
            out[2] = (0x80 | (cp >> 6) & 0x3F) as u8;
            out[3] = (0x80 | cp & 0x3F) as u8;
        }
    }
    len
}
