/// Error reported by strict validation. Lenient operations never produce it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSequence {
    /// Byte offset where the bad sequence starts.
    pub offset: usize,
    /// Bytes the decoder consumed for it.
    pub bytes: Vec<u8>,
}

impl fmt::Display for MalformedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed UTF-8 sequence at byte {}:", self.offset)?;
        for b in &self.bytes {
            write!(f, " {:02x}", b)?;
        }
        Ok(())
    }
}

impl std::error::Error for MalformedSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MalformedSequence { offset: 3, bytes: vec![0xC3, 0x41] };
        assert_eq!(err.to_string(), "malformed UTF-8 sequence at byte 3: c3 41");
    }

    #[test]
    fn test_into_io_error() {
        let err = MalformedSequence { offset: 0, bytes: vec![0x80] };
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, err);
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidData);
        assert!(io.to_string().contains("byte 0: 80"));
    }
}
