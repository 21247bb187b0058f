//! X.509 certificate parser.
//!
//! Produces a [`Certificate`] record from a DER-encoded certificate. The
//! `tbsCertificate` span is captured byte-for-byte before any field
//! extraction, because the signature covers exactly those bytes and the
//! verifier downstream must see them unmodified.
//!
//! Subject and issuer are rendered as `"Organization: CommonName"`; the
//! remaining distinguished-name attributes (country, state, locality,
//! email) are skipped.

use {
    crate::{
        asn1::{
            grammar::{self, Cardinality, Element, Matcher, Shape, TagSpec},
            tag, Class, Cursor, TlvNode,
        },
        error::{Error, ErrorKind, Result},
        oid,
        rsa::{self, PublicKey},
    },
    tracing::debug,
};

/// A decoded certificate.
///
/// Constructed atomically by one successful [`parse_certificate`] call and
/// immutable thereafter. Byte spans borrow from the input buffer and do not
/// outlive it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate<'a> {
    /// `"Organization: CommonName"` rendering of the subject name.
    pub subject:             String,
    /// Same rendering of the issuer name.
    pub issuer:              String,
    /// Raw serial-number INTEGER content octets.
    pub serial:              &'a [u8],
    /// notBefore as seconds since the Unix epoch.
    pub valid_from:          i64,
    /// notAfter as seconds since the Unix epoch.
    pub valid_to:            i64,
    /// The subject public key. Only RSA keys are supported.
    pub public_key:          PublicKey<'a>,
    /// Canonical signature algorithm name, or `"unknown"`.
    pub signature_algorithm: &'static str,
    /// Exact byte span of the signed `tbsCertificate` node.
    pub raw_tbs:             &'a [u8],
    /// Signature content octets (BIT STRING payload).
    pub signature:           &'a [u8],
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Tbs,
    Serial,
    TbsAlgorithm,
    Issuer,
    ValidFrom,
    ValidTo,
    Subject,
    KeyAlgorithm,
    KeyBits,
    SignatureAlgorithm,
    Signature,
}

const SEQUENCE: Matcher = Matcher::Tag(TagSpec::universal(tag::SEQUENCE).constructed());
const TIME: Matcher = Matcher::OneOf(&[
    TagSpec::universal(tag::UTC_TIME).primitive(),
    TagSpec::universal(tag::GENERALIZED_TIME).primitive(),
]);

const fn element(
    name: &'static str,
    matcher: Matcher,
    cardinality: Cardinality,
    action: Option<Action>,
    shape: Shape<Action>,
) -> Element<Action> {
    Element {
        name,
        matcher,
        cardinality,
        action,
        shape,
    }
}

/// `Version ::= [0] EXPLICIT INTEGER`. The value is not recorded; the
/// wrapper only has to be well-formed.
const VERSION: &[Element<Action>] = &[element(
    "version",
    Matcher::Tag(TagSpec::universal(tag::INTEGER).primitive()),
    Cardinality::Required,
    None,
    Shape::Leaf,
)];

const VALIDITY: &[Element<Action>] = &[
    element(
        "notBefore",
        TIME,
        Cardinality::Required,
        Some(Action::ValidFrom),
        Shape::Leaf,
    ),
    element(
        "notAfter",
        TIME,
        Cardinality::Required,
        Some(Action::ValidTo),
        Shape::Leaf,
    ),
];

const SPKI: &[Element<Action>] = &[
    element(
        "algorithm",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::KeyAlgorithm),
        Shape::Leaf,
    ),
    element(
        "subjectPublicKey",
        Matcher::Tag(TagSpec::universal(tag::BIT_STRING).primitive()),
        Cardinality::Required,
        Some(Action::KeyBits),
        Shape::Leaf,
    ),
];

const TBS_CERTIFICATE: &[Element<Action>] = &[
    element(
        "version",
        Matcher::Tag(TagSpec::context(0).constructed()),
        Cardinality::Optional,
        None,
        Shape::Nested(VERSION),
    ),
    element(
        "serialNumber",
        Matcher::Tag(TagSpec::universal(tag::INTEGER).primitive()),
        Cardinality::Required,
        Some(Action::Serial),
        Shape::Leaf,
    ),
    element(
        "signature",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::TbsAlgorithm),
        Shape::Leaf,
    ),
    element(
        "issuer",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::Issuer),
        Shape::Leaf,
    ),
    element(
        "validity",
        SEQUENCE,
        Cardinality::Required,
        None,
        Shape::Nested(VALIDITY),
    ),
    element(
        "subject",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::Subject),
        Shape::Leaf,
    ),
    element(
        "subjectPublicKeyInfo",
        SEQUENCE,
        Cardinality::Required,
        None,
        Shape::Nested(SPKI),
    ),
    element(
        "issuerUniqueID",
        Matcher::Tag(TagSpec::context(1)),
        Cardinality::Optional,
        None,
        Shape::Leaf,
    ),
    element(
        "subjectUniqueID",
        Matcher::Tag(TagSpec::context(2)),
        Cardinality::Optional,
        None,
        Shape::Leaf,
    ),
    element(
        "extensions",
        Matcher::Tag(TagSpec::context(3).constructed()),
        Cardinality::Optional,
        None,
        Shape::Leaf,
    ),
];

const CERTIFICATE: &[Element<Action>] = &[
    element(
        "tbsCertificate",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::Tbs),
        Shape::Nested(TBS_CERTIFICATE),
    ),
    element(
        "signatureAlgorithm",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::SignatureAlgorithm),
        Shape::Leaf,
    ),
    element(
        "signatureValue",
        Matcher::Tag(TagSpec::universal(tag::BIT_STRING).primitive()),
        Cardinality::Required,
        Some(Action::Signature),
        Shape::Leaf,
    ),
];

#[derive(Default)]
struct Builder<'a> {
    raw_tbs:       Option<&'a [u8]>,
    serial:        Option<&'a [u8]>,
    tbs_algorithm: Option<&'a [u8]>,
    issuer:        Option<String>,
    valid_from:    Option<i64>,
    valid_to:      Option<i64>,
    subject:       Option<String>,
    public_key:    Option<PublicKey<'a>>,
    sig_algorithm: Option<&'a [u8]>,
    signature:     Option<&'a [u8]>,
}

impl<'a> Builder<'a> {
    fn apply(&mut self, action: Action, node: &TlvNode<'a>) -> Result<()> {
        match action {
            Action::Tbs => self.raw_tbs = Some(node.raw),
            Action::Serial => self.serial = Some(node.value),
            Action::TbsAlgorithm => self.tbs_algorithm = Some(algorithm_identifier(node)?),
            Action::Issuer => self.issuer = Some(render_name(node)?),
            Action::ValidFrom => self.valid_from = Some(decode_time(node)?),
            Action::ValidTo => self.valid_to = Some(decode_time(node)?),
            Action::Subject => self.subject = Some(render_name(node)?),
            Action::KeyAlgorithm => {
                let algorithm = algorithm_identifier(node)?;
                if oid::name(algorithm) != "rsa" {
                    return Err(Error::new(ErrorKind::UnsupportedAlgorithm, node.offset));
                }
            }
            Action::KeyBits => {
                let key = bit_string(node)?;
                let base = node.offset + (node.raw.len() - node.value.len()) + 1;
                let key_node = Cursor::at_offset(key, base).next()?;
                self.public_key = Some(rsa::parse_key_node(&key_node)?);
            }
            Action::SignatureAlgorithm => self.sig_algorithm = Some(algorithm_identifier(node)?),
            Action::Signature => self.signature = Some(bit_string(node)?),
        }
        Ok(())
    }

    fn finish(self, outer_offset: usize) -> Result<Certificate<'a>> {
        fn complete<T>(field: Option<T>, offset: usize) -> Result<T> {
            field.ok_or(Error::new(ErrorKind::GrammarMismatch, offset))
        }
        let tbs_algorithm = complete(self.tbs_algorithm, outer_offset)?;
        let sig_algorithm = complete(self.sig_algorithm, outer_offset)?;
        // The algorithm inside tbsCertificate and the outer one sign the
        // same statement; a disagreement means the blob was stitched
        // together from two sources.
        if tbs_algorithm != sig_algorithm {
            return Err(Error::new(ErrorKind::GrammarMismatch, outer_offset));
        }
        Ok(Certificate {
            subject:             complete(self.subject, outer_offset)?,
            issuer:              complete(self.issuer, outer_offset)?,
            serial:              complete(self.serial, outer_offset)?,
            valid_from:          complete(self.valid_from, outer_offset)?,
            valid_to:            complete(self.valid_to, outer_offset)?,
            public_key:          complete(self.public_key, outer_offset)?,
            signature_algorithm: oid::name(sig_algorithm),
            raw_tbs:             complete(self.raw_tbs, outer_offset)?,
            signature:           complete(self.signature, outer_offset)?,
        })
    }
}

/// Parses a DER-encoded X.509 certificate.
///
/// Trailing bytes beyond the outermost SEQUENCE are ignored.
pub fn parse_certificate(input: &[u8]) -> Result<Certificate<'_>> {
    debug!(len = input.len(), "parsing X.509 certificate");
    let node = Cursor::new(input).next()?;
    parse_certificate_node(&node)
}

/// Parses a certificate from a node already located inside an enclosing
/// structure (PKCS#7 embeds certificates this way).
pub(crate) fn parse_certificate_node<'a>(node: &TlvNode<'a>) -> Result<Certificate<'a>> {
    if node.class != Class::Universal || node.number != tag::SEQUENCE {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    }
    let mut builder = Builder::default();
    grammar::run(CERTIFICATE, &mut node.descend()?, &mut |action, item| {
        builder.apply(action, item)
    })?;
    builder.finish(node.offset)
}

/// Extracts the algorithm OID content octets from an
/// `AlgorithmIdentifier ::= SEQUENCE { algorithm OID, parameters ANY
/// OPTIONAL }` node. Parameters are skipped, not interpreted.
pub(crate) fn algorithm_identifier<'a>(node: &TlvNode<'a>) -> Result<&'a [u8]> {
    let mut cursor = node.descend()?;
    let algorithm = cursor.next()?;
    if algorithm.class != Class::Universal || algorithm.number != tag::OID || algorithm.constructed
    {
        return Err(Error::new(ErrorKind::GrammarMismatch, algorithm.offset));
    }
    if cursor.remaining() != 0 {
        cursor.next()?;
    }
    if cursor.remaining() != 0 {
        return Err(Error::new(ErrorKind::GrammarMismatch, cursor.offset()));
    }
    Ok(algorithm.value)
}

/// Content octets of a BIT STRING that must not have unused bits: key and
/// signature material is always a whole number of octets.
fn bit_string<'a>(node: &TlvNode<'a>) -> Result<&'a [u8]> {
    match node.value {
        [0, rest @ ..] => Ok(rest),
        _ => Err(Error::new(ErrorKind::UnsupportedEncoding, node.offset)),
    }
}

/// Renders a `Name` (RDNSequence) as `"Organization: CommonName"`.
///
/// Only the two human-readable attributes are kept; when several RDNs
/// carry the same attribute the last occurrence wins.
pub(crate) fn render_name(node: &TlvNode<'_>) -> Result<String> {
    let mut organization = None;
    let mut common_name = None;

    let mut rdns = node.descend()?;
    while rdns.remaining() != 0 {
        let set = rdns.next()?;
        let mut attributes = set.descend()?;
        while attributes.remaining() != 0 {
            let attribute = attributes.next()?;
            let mut pair = attribute.descend()?;
            let attr_type = pair.consume_primitive()?;
            let value = pair.next()?;
            if pair.remaining() != 0 {
                return Err(Error::new(ErrorKind::GrammarMismatch, pair.offset()));
            }
            let Some(attr_oid) = oid::decode(attr_type) else {
                continue;
            };
            if attr_oid == oid::AT_ORGANIZATION {
                organization = Some(name_string(&value)?);
            } else if attr_oid == oid::AT_COMMON_NAME {
                common_name = Some(name_string(&value)?);
            }
        }
    }

    Ok(match (organization, common_name) {
        (Some(o), Some(cn)) => format!("{o}: {cn}"),
        (Some(o), None) => o.to_owned(),
        (None, Some(cn)) => cn.to_owned(),
        (None, None) => String::new(),
    })
}

fn name_string<'a>(node: &TlvNode<'a>) -> Result<&'a str> {
    let printable = matches!(
        node.number,
        tag::UTF8_STRING | tag::PRINTABLE_STRING | tag::T61_STRING | tag::IA5_STRING
    );
    if node.class != Class::Universal || !printable || node.constructed {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    }
    core::str::from_utf8(node.value)
        .map_err(|_| Error::new(ErrorKind::GrammarMismatch, node.offset))
}

/// Decodes UTCTime (`YYMMDDHHMMSSZ`, pivot YY<50 → 20YY) or
/// GeneralizedTime (`YYYYMMDDHHMMSSZ`) into seconds since the Unix epoch.
pub(crate) fn decode_time(node: &TlvNode<'_>) -> Result<i64> {
    let malformed = || Error::new(ErrorKind::MalformedTime, node.offset);

    let (year, rest) = match node.number {
        tag::UTC_TIME if node.value.len() == 13 => {
            let yy = two_digits(&node.value[0..2]).ok_or_else(malformed)?;
            let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
            (year, &node.value[2..])
        }
        tag::GENERALIZED_TIME if node.value.len() == 15 => {
            let century = two_digits(&node.value[0..2]).ok_or_else(malformed)?;
            let yy = two_digits(&node.value[2..4]).ok_or_else(malformed)?;
            (century * 100 + yy, &node.value[4..])
        }
        _ => return Err(malformed()),
    };

    if rest[10] != b'Z' {
        return Err(malformed());
    }
    let month = two_digits(&rest[0..2]).ok_or_else(malformed)?;
    let day = two_digits(&rest[2..4]).ok_or_else(malformed)?;
    let hour = two_digits(&rest[4..6]).ok_or_else(malformed)?;
    let minute = two_digits(&rest[6..8]).ok_or_else(malformed)?;
    let second = two_digits(&rest[8..10]).ok_or_else(malformed)?;

    if !(1..=12).contains(&month)
        || day < 1
        || day > days_in_month(year, month)
        || hour > 23
        || minute > 59
        || second > 59
    {
        return Err(malformed());
    }

    let days = days_from_civil(year, month, day);
    Ok(days * 86400 + hour * 3600 + minute * 60 + second)
}

fn two_digits(digits: &[u8]) -> Option<i64> {
    match digits {
        &[a @ b'0'..=b'9', b @ b'0'..=b'9'] => {
            Some(i64::from(a - b'0') * 10 + i64::from(b - b'0'))
        }
        _ => None,
    }
}

fn days_in_month(year: i64, month: i64) -> i64 {
    const LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    if month == 2 && leap {
        29
    } else {
        LENGTHS[(month - 1) as usize]
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}
