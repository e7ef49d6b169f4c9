use thiserror::Error;

/// Errors produced while opening or decoding a trace stream.
///
/// A clean end of stream is not an error; the parser reports it separately.
#[derive(Error, Debug)]
pub enum Error {
    /// The first 16 bytes of the stream are not the expected trace header.
    #[error("invalid header: \"{}\"", .found.escape_ascii())]
    InvalidHeader { found: Vec<u8> },

    /// The stream ended before a full header could be read.
    #[error("truncated header: stream ended before 16 header bytes")]
    TruncatedHeader,

    /// The stream ended in the middle of an event record.
    #[error("truncated event record at offset {offset}: unexpected end of input reading {context}")]
    Truncated { offset: u64, context: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was raised while validating the stream header.
    pub fn is_header(&self) -> bool {
        matches!(self, Error::InvalidHeader { .. } | Error::TruncatedHeader)
    }

    /// Whether the error was raised while decoding an event record.
    pub fn is_decode(&self) -> bool {
        !self.is_header()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
