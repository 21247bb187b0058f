//! Decode errors.
//!
//! Every failure is reported at the point of first violation, together with
//! the absolute byte offset into the input buffer where it was detected.
//! There is no partial-result recovery: a failed parse yields no record.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Kind of decoding failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ErrorKind {
    /// A declared length exceeds the bytes remaining in the enclosing scope.
    #[error("declared length exceeds available input")]
    TruncatedInput,

    /// Indefinite-length or another non-canonical BER form. Only DER is
    /// accepted; alternate encodings of the same value are an attack surface.
    #[error("non-canonical or indefinite-length encoding")]
    UnsupportedEncoding,

    /// A tag whose number requires more continuation octets than supported.
    #[error("malformed tag")]
    MalformedTag,

    /// Structurally invalid INTEGER content (empty, or negative where a
    /// DER guard byte was required).
    #[error("malformed INTEGER")]
    MalformedInteger,

    /// UTCTime or GeneralizedTime outside the recognized syntax or range.
    #[error("malformed time")]
    MalformedTime,

    /// A required grammar element is absent or carries the wrong tag.
    #[error("input does not match grammar")]
    GrammarMismatch,

    /// Recognized structure, but an algorithm this decoder does not support.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    /// A PKCS#7 message with no signer infos.
    #[error("message contains no signer information")]
    EmptyMessage,
}

/// A decoding error: what went wrong and where.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("{kind} at offset {offset:#x}")]
pub struct Error {
    kind:   ErrorKind,
    offset: usize,
}

impl Error {
    pub(crate) const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The failure category.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Absolute byte offset into the input at which the violation was found.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
