mod utf8;
mod wide;

pub use utf8::{
    decode, decode_strict, encode, encode_into, normalize, size, size_at, validate,
    Codepoint, Decoded, EncodedUtf8, MAX_CODEPOINT, REPLACEMENT,
};
pub use wide::{
    encode_wide, encode_wide_into, show, wide_len, widen, widen_into, widen_terminated,
    WideUnits,
};
