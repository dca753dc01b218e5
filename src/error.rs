/// Error types for decoding and replaying sketch files.
///
/// Running out of input between instructions is not an error; the decoder
/// just stops. Everything here aborts the replay.
use std::io;
use thiserror::Error;

/// Errors raised while decoding the instruction stream. `offset` is the
/// position of the opcode byte of the instruction being decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// an extended operand ran past the end of the stream
    #[error("truncated stream at byte {offset}: extended operand needs {needed} bytes")]
    TruncatedStream { offset: usize, needed: usize },

    /// the 4-bit extended opcode isn't one we know
    #[error("unrecognised extended opcode 0x{opcode:x} at byte {offset}")]
    UnrecognizedExtendedOpcode { offset: usize, opcode: u8 },

    /// the byte source itself failed
    #[error("read failed at byte {offset}")]
    Io {
        offset: usize,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    /// byte offset of the instruction that failed
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::TruncatedStream { offset, .. }
            | DecodeError::UnrecognizedExtendedOpcode { offset, .. }
            | DecodeError::Io { offset, .. } => *offset,
        }
    }
}

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("drawing surface failed")]
    Surface(#[source] io::Error),

    #[error("couldn't write listing")]
    Output(#[source] io::Error),
}

/// Errors in command-line configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no sketch file given")]
    MissingPath,

    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("option {0} needs a value")]
    MissingValue(String),

    #[error("bad size {0:?}, expected WIDTHxHEIGHT")]
    BadSize(String),

    #[error("unexpected argument {0}")]
    UnexpectedArgument(String),
}
