use thiserror::Error;

/// Precondition violations reported by the validating entry points.
///
/// The unchecked kernel never produces these; it assumes every precondition
/// already holds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IirError {
    #[error("filter order must be at least 1")]
    ZeroOrder,
    #[error("coefficient table of {len} values is not a whole number of {block_len}-value blocks")]
    TableLength { len: usize, block_len: usize },
    #[error("coefficient block halves must both hold {expected} values (got b={b}, a={a})")]
    BlockShape { expected: usize, b: usize, a: usize },
    #[error("{buffer} buffer holds {len} entries but {required} are required")]
    BufferTooShort {
        buffer: &'static str,
        len: usize,
        required: usize,
    },
    #[error("coefficient index {index} at position {position} exceeds table of {blocks} blocks")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        blocks: usize,
    },
    #[error("interleaved buffer of {len} values is not divisible into {channels}-channel frames")]
    Interleave { len: usize, channels: usize },
    #[error("{0} pointer is null")]
    NullPointer(&'static str),
    #[error("negative coefficient index {index} at position {position}")]
    NegativeIndex { position: usize, index: i32 },
    #[error("input and output buffers overlap")]
    Aliased,
    #[error("invalid kernel configuration: {0}")]
    Config(String),
}

impl IirError {
    /// Status code returned across the C boundary. Success is `0`.
    pub fn code(&self) -> i32 {
        match self {
            IirError::ZeroOrder => -1,
            IirError::TableLength { .. } => -2,
            IirError::BlockShape { .. } => -3,
            IirError::BufferTooShort { .. } => -4,
            IirError::IndexOutOfRange { .. } => -5,
            IirError::Interleave { .. } => -6,
            IirError::NullPointer(_) => -7,
            IirError::NegativeIndex { .. } => -8,
            IirError::Aliased => -9,
            IirError::Config(_) => -10,
        }
    }
}

pub type Result<T> = core::result::Result<T, IirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_negative() {
        let errors = [
            IirError::ZeroOrder,
            IirError::TableLength { len: 3, block_len: 4 },
            IirError::BlockShape {
                expected: 2,
                b: 1,
                a: 2,
            },
            IirError::BufferTooShort {
                buffer: "input",
                len: 1,
                required: 2,
            },
            IirError::IndexOutOfRange {
                position: 4,
                index: 9,
                blocks: 2,
            },
            IirError::Interleave { len: 3, channels: 2 },
            IirError::NullPointer("input"),
            IirError::NegativeIndex {
                position: 1,
                index: -1,
            },
            IirError::Aliased,
            IirError::Config("eof".into()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(IirError::code).collect();
        assert!(codes.iter().all(|&code| code < 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn messages_name_the_offending_buffer() {
        let err = IirError::BufferTooShort {
            buffer: "output",
            len: 8,
            required: 16,
        };
        assert_eq!(
            err.to_string(),
            "output buffer holds 8 entries but 16 are required"
        );
    }
}
