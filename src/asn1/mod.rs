//! Generic ASN.1 DER decoding.
//!
//! [`Cursor`] walks a byte buffer as a flat run of tag/length/value nodes,
//! handing out borrowed views only after the declared length has been
//! cross-checked against the bytes physically remaining in the current
//! scope. Nothing here interprets content; the grammar engine and the
//! structured parsers sit on top.
//!
//! Only DER is accepted. Indefinite lengths, non-minimal length forms and
//! other BER liberties are rejected up front: canonical encoding is what
//! makes the greedy matching in [`grammar`] sound.

pub mod grammar;

use crate::error::{Error, ErrorKind, Result};

/// Tag class from the two leading bits of the identifier octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0xc0 {
            0x00 => Self::Universal,
            0x40 => Self::Application,
            0x80 => Self::Context,
            _ => Self::Private,
        }
    }
}

/// Universal tag numbers used by the firmware-signing grammars.
pub mod tag {
    pub const BOOLEAN: u32 = 1;
    pub const INTEGER: u32 = 2;
    pub const BIT_STRING: u32 = 3;
    pub const OCTET_STRING: u32 = 4;
    pub const NULL: u32 = 5;
    pub const OID: u32 = 6;
    pub const UTF8_STRING: u32 = 12;
    pub const SEQUENCE: u32 = 16;
    pub const SET: u32 = 17;
    pub const PRINTABLE_STRING: u32 = 19;
    pub const T61_STRING: u32 = 20;
    pub const IA5_STRING: u32 = 22;
    pub const UTC_TIME: u32 = 23;
    pub const GENERALIZED_TIME: u32 = 24;
}

/// Parsed identifier + length octets of the node at the cursor, not yet
/// consumed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub class:       Class,
    pub constructed: bool,
    pub number:      u32,
    pub len:         usize,
    header_len:      usize,
}

/// One decoded node: header plus borrowed views into the input.
///
/// `raw` spans the entire encoding (identifier and length octets included),
/// `value` only the content octets. Both are views into the caller's
/// buffer; nothing is copied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TlvNode<'a> {
    pub class:       Class,
    pub constructed: bool,
    pub number:      u32,
    pub raw:         &'a [u8],
    pub value:       &'a [u8],
    /// Absolute offset of the identifier octet in the original input.
    pub offset:      usize,
}

impl<'a> TlvNode<'a> {
    /// Sub-cursor scoped to this node's content octets.
    ///
    /// Fails with `GrammarMismatch` on a primitive node, which has no
    /// children to walk.
    pub fn descend(&self) -> Result<Cursor<'a>> {
        if !self.constructed {
            return Err(Error::new(ErrorKind::GrammarMismatch, self.offset));
        }
        Ok(Cursor {
            buf:  self.value,
            pos:  0,
            base: self.offset + (self.raw.len() - self.value.len()),
        })
    }
}

/// Walks one scope of a DER buffer.
///
/// A top-level cursor spans the whole input; [`TlvNode::descend`] produces
/// sub-cursors bounded by the parent's content octets, so no child can ever
/// read past its parent. `base` keeps error offsets absolute across nesting.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf:  &'a [u8],
    pos:  usize,
    base: usize,
}

/// Continuation octets accepted in a high-tag-number form. Nothing in a
/// signing artifact needs tag numbers beyond 21 bits.
const MAX_TAG_CONTINUATIONS: usize = 3;

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            buf:  input,
            pos:  0,
            base: 0,
        }
    }

    /// Cursor over a slice carved out of a larger input, keeping error
    /// offsets relative to that input. Used where a nested DER blob lives
    /// inside another node's content (BIT STRING payloads).
    pub(crate) fn at_offset(input: &'a [u8], base: usize) -> Self {
        Self {
            buf: input,
            pos: 0,
            base,
        }
    }

    /// Bytes not yet consumed in this scope.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Absolute offset of the next unconsumed byte.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn err(&self, kind: ErrorKind, at: usize) -> Error {
        Error::new(kind, self.base + at)
    }

    fn byte(&self, at: usize) -> Result<u8> {
        self.buf
            .get(at)
            .copied()
            .ok_or_else(|| self.err(ErrorKind::TruncatedInput, self.buf.len()))
    }

    /// Decodes the identifier and length octets of the next node without
    /// consuming anything. Returns `None` when the scope is exhausted.
    pub fn peek(&self) -> Result<Option<Header>> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let start = self.pos;
        let ident = self.byte(start)?;
        let class = Class::from_bits(ident);
        let constructed = ident & 0x20 != 0;
        let mut at = start + 1;

        let number = if ident & 0x1f != 0x1f {
            u32::from(ident & 0x1f)
        } else {
            // High-tag-number form: base-128 continuation octets.
            let mut number: u32 = 0;
            let mut count = 0;
            loop {
                if count == MAX_TAG_CONTINUATIONS {
                    return Err(self.err(ErrorKind::MalformedTag, start));
                }
                let octet = self.byte(at)?;
                at += 1;
                count += 1;
                number = (number << 7) | u32::from(octet & 0x7f);
                if octet & 0x80 == 0 {
                    break;
                }
            }
            number
        };

        let len_octet = self.byte(at)?;
        at += 1;
        let len = if len_octet & 0x80 == 0 {
            usize::from(len_octet)
        } else {
            let count = usize::from(len_octet & 0x7f);
            if count == 0 {
                // 0x80 is the BER indefinite-length marker.
                return Err(self.err(ErrorKind::UnsupportedEncoding, at - 1));
            }
            if count > 4 {
                return Err(self.err(ErrorKind::UnsupportedEncoding, at - 1));
            }
            let mut len: usize = 0;
            for _ in 0..count {
                len = (len << 8) | usize::from(self.byte(at)?);
                at += 1;
            }
            // DER shortest-form rule: no leading zero octet, and values
            // under 128 must use the short form.
            if len < 128 || len >> (8 * (count - 1)) == 0 {
                return Err(self.err(ErrorKind::UnsupportedEncoding, at - count));
            }
            len
        };

        // The claimed length is never trusted without this cross-check.
        if len > self.buf.len() - at {
            return Err(self.err(ErrorKind::TruncatedInput, at));
        }

        Ok(Some(Header {
            class,
            constructed,
            number,
            len,
            header_len: at - start,
        }))
    }

    /// Consumes the next node whole, returning borrowed header and value
    /// views. Fails with `GrammarMismatch` when the scope is exhausted.
    pub fn next(&mut self) -> Result<TlvNode<'a>> {
        let header = self
            .peek()?
            .ok_or_else(|| self.err(ErrorKind::GrammarMismatch, self.pos))?;
        let start = self.pos;
        let end = start + header.header_len + header.len;
        let node = TlvNode {
            class:       header.class,
            constructed: header.constructed,
            number:      header.number,
            raw:         &self.buf[start..end],
            value:       &self.buf[start + header.header_len..end],
            offset:      self.base + start,
        };
        self.pos = end;
        Ok(node)
    }

    /// Consumes the next node, which must be primitive, and returns its
    /// content octets.
    pub fn consume_primitive(&mut self) -> Result<&'a [u8]> {
        let node = self.next()?;
        if node.constructed {
            return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
        }
        Ok(node.value)
    }
}
