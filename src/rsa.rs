//! Raw RSA public key parser.
//!
//! Decodes `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent
//! INTEGER }` as produced by stripping the SubjectPublicKeyInfo wrapper
//! from an exported key. The INTEGER content octets are handed over
//! unmodified: a leading zero guard byte (DER's sign-avoidance rule when
//! the high bit of the true value is set) is part of the material, and any
//! numeric interpretation is the caller's concern.

use {
    crate::{
        asn1::{
            grammar::{self, Cardinality, Element, Matcher, Shape, TagSpec},
            tag, Class, Cursor, TlvNode,
        },
        error::{Error, ErrorKind, Result},
    },
    tracing::debug,
};

/// An RSA public key decoded from a DER blob.
///
/// Borrows from the input buffer; valid only as long as that buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey<'a> {
    /// Canonical key algorithm name, "rsa" for keys parsed here.
    pub algorithm: &'static str,
    /// The exact `RSAPublicKey` SEQUENCE span, headers included. This is
    /// the blob a verification pipeline hashes or re-exports.
    pub raw:       &'a [u8],
    /// Big-endian unsigned modulus content octets, guard byte preserved.
    pub modulus:   &'a [u8],
    /// Public exponent content octets.
    pub exponent:  &'a [u8],
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Modulus,
    Exponent,
}

const INTEGER: Matcher = Matcher::Tag(TagSpec::universal(tag::INTEGER));

const RSA_PUBLIC_KEY: &[Element<Action>] = &[
    Element {
        name:        "modulus",
        matcher:     INTEGER,
        cardinality: Cardinality::Required,
        action:      Some(Action::Modulus),
        shape:       Shape::Leaf,
    },
    Element {
        name:        "publicExponent",
        matcher:     INTEGER,
        cardinality: Cardinality::Required,
        action:      Some(Action::Exponent),
        shape:       Shape::Leaf,
    },
];

/// Validates one unsigned INTEGER and returns its content octets.
///
/// DER encodes a value whose high bit is set with a leading zero guard
/// byte; content with the high bit set therefore denotes a negative
/// number, which no key field may be. An absent guard byte indicates a
/// non-canonical or corrupted encoding.
fn unsigned_integer<'a>(node: &TlvNode<'a>) -> Result<&'a [u8]> {
    if node.constructed {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    }
    match node.value {
        [] => Err(Error::new(ErrorKind::MalformedInteger, node.offset)),
        [first, ..] if first & 0x80 != 0 => {
            Err(Error::new(ErrorKind::MalformedInteger, node.offset))
        }
        // A guard byte is only canonical when the next octet needs it.
        [0, second, ..] if second & 0x80 == 0 => {
            Err(Error::new(ErrorKind::UnsupportedEncoding, node.offset))
        }
        value => Ok(value),
    }
}

/// Parses a bare RSA public key blob.
///
/// Trailing bytes beyond the outermost SEQUENCE are ignored.
pub fn parse_rsa_public_key(input: &[u8]) -> Result<PublicKey<'_>> {
    debug!(len = input.len(), "parsing RSA public key blob");
    let node = Cursor::new(input).next()?;
    parse_key_node(&node)
}

/// Parses an `RSAPublicKey` SEQUENCE node already located by a caller
/// (the certificate parser finds it inside subjectPublicKeyInfo).
pub(crate) fn parse_key_node<'a>(node: &TlvNode<'a>) -> Result<PublicKey<'a>> {
    if node.class != Class::Universal
        || node.number != tag::SEQUENCE
        || !node.constructed
    {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    }

    let mut modulus = None;
    let mut exponent = None;
    grammar::run(RSA_PUBLIC_KEY, &mut node.descend()?, &mut |action, item| {
        let value = unsigned_integer(item)?;
        match action {
            Action::Modulus => modulus = Some(value),
            Action::Exponent => exponent = Some(value),
        }
        Ok(())
    })?;

    // Both elements are required, so the grammar cannot succeed without
    // filling them.
    let (Some(modulus), Some(exponent)) = (modulus, exponent) else {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    };
    Ok(PublicKey {
        algorithm: "rsa",
        raw: node.raw,
        modulus,
        exponent,
    })
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn small_key_roundtrip() {
        // modulus 0x00bc.., exponent 65537.
        let buf = hex!("30 0a 02 03 00 bc 61 02 03 01 00 01");
        let key = parse_rsa_public_key(&buf).unwrap();
        assert_eq!(key.algorithm, "rsa");
        assert_eq!(key.raw, &buf[..]);
        assert_eq!(key.modulus, hex!("00 bc 61"));
        assert_eq!(key.exponent, hex!("01 00 01"));
    }

    #[test]
    fn negative_integer_rejected() {
        // Modulus content 0xbc61 with no guard byte: negative in DER.
        let buf = hex!("30 09 02 02 bc 61 02 03 01 00 01");
        let err = parse_rsa_public_key(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInteger);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn empty_integer_rejected() {
        let buf = hex!("30 07 02 00 02 03 01 00 01");
        let err = parse_rsa_public_key(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInteger);
    }

    #[test]
    fn redundant_guard_byte_rejected() {
        let buf = hex!("30 0a 02 03 00 3c 61 02 03 01 00 01");
        let err = parse_rsa_public_key(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedEncoding);
    }

    #[test]
    fn missing_exponent_rejected() {
        let buf = hex!("30 05 02 03 00 bc 61");
        let err = parse_rsa_public_key(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
    }
}
