//! PKCS#7 signed-message parser.
//!
//! Decodes a `ContentInfo` carrying `SignedData`: the declared content,
//! the embedded certificate set and the signer infos. The signed content
//! itself is usually detached in firmware signing (sbsign-style images),
//! in which case only its declared length is recorded; see
//! [`Pkcs7Message::content_len`].

use {
    crate::{
        asn1::{
            grammar::{self, Cardinality, Element, Matcher, Shape, TagSpec},
            tag, Class, Cursor, TlvNode,
        },
        error::{Error, ErrorKind, Result},
        oid,
        x509::{self, Certificate},
    },
    tracing::debug,
};

/// Authenticated-attribute presence bits.
pub const AA_CONTENT_TYPE: u8 = 1 << 0;
pub const AA_MESSAGE_DIGEST: u8 = 1 << 1;
pub const AA_SIGNING_TIME: u8 = 1 << 2;
/// Extension attributes: S/MIME capabilities and the Microsoft SPC
/// (Authenticode) attribute types.
pub const AA_EXTENSION: u8 = 1 << 3;

/// One signature over the message content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerInfo<'a> {
    /// Issuer of the signing certificate, rendered like
    /// [`Certificate::issuer`]. Together with `serial` this locates the
    /// matching certificate in the same message.
    pub issuer:           String,
    /// Serial-number INTEGER content octets of the signing certificate.
    pub serial:           &'a [u8],
    /// Canonical digest algorithm name, or `"unknown"`.
    pub digest_algorithm: &'static str,
    /// Digest from the message-digest authenticated attribute, when
    /// present. Its length is fixed by the digest algorithm.
    pub message_digest:   &'a [u8],
    /// Bitmask of recognized authenticated attributes (`AA_*`), not a
    /// count.
    pub aa_set:           u8,
    /// Signing time from the corresponding attribute, when present.
    pub signing_time:     Option<i64>,
    /// Signature content octets (the encryptedDigest OCTET STRING).
    pub signature:        &'a [u8],
}

/// A decoded PKCS#7 signed message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pkcs7Message<'a> {
    /// Canonical name of the embedded content's type, or `"unknown"`.
    pub content_type: &'static str,
    /// Declared length of the signed content. Detached mode omits content
    /// bytes, not the length-carrying field, so this is meaningful even
    /// when `content` is `None`.
    pub content_len:  usize,
    /// Embedded content bytes. `None` for detached signatures.
    pub content:      Option<&'a [u8]>,
    /// Certificates embedded in the message, in encounter order.
    pub certificates: Vec<Certificate<'a>>,
    /// Signer infos, in encounter order. Never empty.
    pub signer_infos: Vec<SignerInfo<'a>>,
}

impl<'a> Pkcs7Message<'a> {
    /// Locates the embedded certificate a signer info refers to by issuer
    /// and serial number.
    ///
    /// `None` is not a failure: the certificate may be supplied
    /// out-of-band by the caller.
    pub fn signer_certificate(&self, signer: &SignerInfo<'_>) -> Option<&Certificate<'a>> {
        self.certificates
            .iter()
            .find(|cert| cert.issuer == signer.issuer && cert.serial == signer.serial)
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ContentType,
    EmbeddedContent,
    Certificate,
    Signer,
}

#[derive(Clone, Copy, Debug)]
enum SignerAction {
    Issuer,
    Serial,
    DigestAlgorithm,
    AuthenticatedAttributes,
    Signature,
}

const SEQUENCE: Matcher = Matcher::Tag(TagSpec::universal(tag::SEQUENCE).constructed());

const fn element<A: 'static>(
    name: &'static str,
    matcher: Matcher,
    cardinality: Cardinality,
    action: Option<A>,
    shape: Shape<A>,
) -> Element<A> {
    Element {
        name,
        matcher,
        cardinality,
        action,
        shape,
    }
}

/// `SignedData ::= SEQUENCE { version, digestAlgorithms, contentInfo,
/// certificates [0] OPTIONAL, crls [1] OPTIONAL, signerInfos }`.
const SIGNED_DATA: &[Element<Action>] = &[
    element(
        "version",
        Matcher::Tag(TagSpec::universal(tag::INTEGER).primitive()),
        Cardinality::Required,
        None,
        Shape::Leaf,
    ),
    element(
        "digestAlgorithms",
        Matcher::Tag(TagSpec::universal(tag::SET).constructed()),
        Cardinality::Required,
        None,
        Shape::Nested(&[element(
            "digestAlgorithmIdentifier",
            SEQUENCE,
            Cardinality::ZeroOrMore,
            None,
            Shape::Leaf,
        )]),
    ),
    element(
        "contentInfo",
        SEQUENCE,
        Cardinality::Required,
        Some(Action::EmbeddedContent),
        Shape::Leaf,
    ),
    element(
        "certificates",
        Matcher::Tag(TagSpec::context(0).constructed()),
        Cardinality::Optional,
        None,
        Shape::Nested(&[element(
            "certificate",
            SEQUENCE,
            Cardinality::ZeroOrMore,
            Some(Action::Certificate),
            Shape::Leaf,
        )]),
    ),
    element(
        "crls",
        Matcher::Tag(TagSpec::context(1)),
        Cardinality::Optional,
        None,
        Shape::Leaf,
    ),
    element(
        "signerInfos",
        Matcher::Tag(TagSpec::universal(tag::SET).constructed()),
        Cardinality::Optional,
        None,
        Shape::Nested(&[element(
            "signerInfo",
            SEQUENCE,
            Cardinality::ZeroOrMore,
            Some(Action::Signer),
            Shape::Leaf,
        )]),
    ),
];

/// `ContentInfo ::= SEQUENCE { contentType OID, content [0] EXPLICIT
/// SignedData }`, the outermost structure.
const CONTENT_INFO: &[Element<Action>] = &[
    element(
        "contentType",
        Matcher::Tag(TagSpec::universal(tag::OID).primitive()),
        Cardinality::Required,
        Some(Action::ContentType),
        Shape::Leaf,
    ),
    element(
        "content",
        Matcher::Tag(TagSpec::context(0).constructed()),
        Cardinality::Required,
        None,
        Shape::Nested(&[element(
            "signedData",
            SEQUENCE,
            Cardinality::Required,
            None,
            Shape::Nested(SIGNED_DATA),
        )]),
    ),
];

const ISSUER_AND_SERIAL: &[Element<SignerAction>] = &[
    element(
        "issuer",
        SEQUENCE,
        Cardinality::Required,
        Some(SignerAction::Issuer),
        Shape::Leaf,
    ),
    element(
        "serialNumber",
        Matcher::Tag(TagSpec::universal(tag::INTEGER).primitive()),
        Cardinality::Required,
        Some(SignerAction::Serial),
        Shape::Leaf,
    ),
];

const SIGNER_INFO: &[Element<SignerAction>] = &[
    element(
        "version",
        Matcher::Tag(TagSpec::universal(tag::INTEGER).primitive()),
        Cardinality::Required,
        None,
        Shape::Leaf,
    ),
    element(
        "issuerAndSerialNumber",
        SEQUENCE,
        Cardinality::Required,
        None,
        Shape::Nested(ISSUER_AND_SERIAL),
    ),
    element(
        "digestAlgorithm",
        SEQUENCE,
        Cardinality::Required,
        Some(SignerAction::DigestAlgorithm),
        Shape::Leaf,
    ),
    element(
        "authenticatedAttributes",
        Matcher::Tag(TagSpec::context(0).constructed()),
        Cardinality::Optional,
        Some(SignerAction::AuthenticatedAttributes),
        Shape::Leaf,
    ),
    element(
        "digestEncryptionAlgorithm",
        SEQUENCE,
        Cardinality::Required,
        None,
        Shape::Leaf,
    ),
    element(
        "encryptedDigest",
        Matcher::Tag(TagSpec::universal(tag::OCTET_STRING).primitive()),
        Cardinality::Required,
        Some(SignerAction::Signature),
        Shape::Leaf,
    ),
    element(
        "unauthenticatedAttributes",
        Matcher::Tag(TagSpec::context(1)),
        Cardinality::Optional,
        None,
        Shape::Leaf,
    ),
];

#[derive(Default)]
struct Builder<'a> {
    content_type: Option<&'static str>,
    content_len:  usize,
    content:      Option<&'a [u8]>,
    certificates: Vec<Certificate<'a>>,
    signer_infos: Vec<SignerInfo<'a>>,
}

impl<'a> Builder<'a> {
    fn apply(&mut self, action: Action, node: &TlvNode<'a>) -> Result<()> {
        match action {
            Action::ContentType => {
                // Only SignedData messages make sense here; anything else
                // is a recognized structure this decoder does not handle.
                if oid::decode(node.value) != Some(oid::PKCS7_SIGNED_DATA) {
                    return Err(Error::new(ErrorKind::UnsupportedAlgorithm, node.offset));
                }
            }
            Action::EmbeddedContent => self.embedded_content(node)?,
            Action::Certificate => {
                self.certificates.push(x509::parse_certificate_node(node)?);
            }
            Action::Signer => self.signer_infos.push(parse_signer_info(node)?),
        }
        Ok(())
    }

    /// Inner `ContentInfo ::= SEQUENCE { contentType OID, content [0]
    /// EXPLICIT ANY OPTIONAL }` describing the signed content.
    ///
    /// The pkcs7-data type embeds the content as an OCTET STRING. The
    /// Microsoft indirect-data type (Authenticode) describes detached
    /// content: its payload declares what was signed, so its length is
    /// recorded but no content bytes are exposed.
    fn embedded_content(&mut self, node: &TlvNode<'a>) -> Result<()> {
        let mut cursor = node.descend()?;
        let content_type = cursor.next()?;
        if content_type.class != Class::Universal
            || content_type.number != tag::OID
            || content_type.constructed
        {
            return Err(Error::new(ErrorKind::GrammarMismatch, content_type.offset));
        }
        self.content_type = Some(oid::name(content_type.value));

        if cursor.remaining() == 0 {
            // No content field at all: nothing declared.
            return Ok(());
        }
        let wrapper = cursor.next()?;
        if wrapper.class != Class::Context || wrapper.number != 0 || !wrapper.constructed {
            return Err(Error::new(ErrorKind::GrammarMismatch, wrapper.offset));
        }
        if cursor.remaining() != 0 {
            return Err(Error::new(ErrorKind::GrammarMismatch, cursor.offset()));
        }
        let mut inner = wrapper.descend()?;
        let payload = inner.next()?;
        if inner.remaining() != 0 {
            return Err(Error::new(ErrorKind::GrammarMismatch, inner.offset()));
        }

        self.content_len = payload.value.len();
        if oid::decode(content_type.value) == Some(oid::PKCS7_DATA) {
            self.content = Some(payload.value);
        }
        Ok(())
    }

    fn finish(self, outer_offset: usize) -> Result<Pkcs7Message<'a>> {
        if self.signer_infos.is_empty() {
            return Err(Error::new(ErrorKind::EmptyMessage, outer_offset));
        }
        Ok(Pkcs7Message {
            content_type: self.content_type.unwrap_or(oid::UNKNOWN),
            content_len:  self.content_len,
            content:      self.content,
            certificates: self.certificates,
            signer_infos: self.signer_infos,
        })
    }
}

/// Parses a DER-encoded PKCS#7 signed message.
///
/// Trailing bytes beyond the outermost SEQUENCE are ignored.
pub fn parse_pkcs7_message(input: &[u8]) -> Result<Pkcs7Message<'_>> {
    debug!(len = input.len(), "parsing PKCS#7 message");
    let node = Cursor::new(input).next()?;
    if node.class != Class::Universal || node.number != tag::SEQUENCE {
        return Err(Error::new(ErrorKind::GrammarMismatch, node.offset));
    }
    let mut builder = Builder::default();
    grammar::run(CONTENT_INFO, &mut node.descend()?, &mut |action, item| {
        builder.apply(action, item)
    })?;
    builder.finish(node.offset)
}

fn parse_signer_info<'a>(node: &TlvNode<'a>) -> Result<SignerInfo<'a>> {
    struct Fields<'a> {
        issuer:           Option<String>,
        serial:           Option<&'a [u8]>,
        digest_algorithm: Option<&'static str>,
        message_digest:   Option<&'a [u8]>,
        aa_set:           u8,
        signing_time:     Option<i64>,
        signature:        Option<&'a [u8]>,
    }
    let mut fields = Fields {
        issuer:           None,
        serial:           None,
        digest_algorithm: None,
        message_digest:   None,
        aa_set:           0,
        signing_time:     None,
        signature:        None,
    };

    grammar::run(SIGNER_INFO, &mut node.descend()?, &mut |action, item| {
        match action {
            SignerAction::Issuer => fields.issuer = Some(x509::render_name(item)?),
            SignerAction::Serial => fields.serial = Some(item.value),
            SignerAction::DigestAlgorithm => {
                fields.digest_algorithm = Some(oid::name(x509::algorithm_identifier(item)?));
            }
            SignerAction::AuthenticatedAttributes => {
                let mut attributes = item.descend()?;
                while attributes.remaining() != 0 {
                    let attribute = attributes.next()?;
                    let (bit, digest, time) = authenticated_attribute(&attribute)?;
                    fields.aa_set |= bit;
                    if let Some(digest) = digest {
                        fields.message_digest = Some(digest);
                    }
                    if let Some(time) = time {
                        fields.signing_time = Some(time);
                    }
                }
            }
            SignerAction::Signature => fields.signature = Some(item.value),
        }
        Ok(())
    })?;

    let incomplete = || Error::new(ErrorKind::GrammarMismatch, node.offset);
    Ok(SignerInfo {
        issuer:           fields.issuer.ok_or_else(incomplete)?,
        serial:           fields.serial.ok_or_else(incomplete)?,
        digest_algorithm: fields.digest_algorithm.ok_or_else(incomplete)?,
        message_digest:   fields.message_digest.unwrap_or(&[]),
        aa_set:           fields.aa_set,
        signing_time:     fields.signing_time,
        signature:        fields.signature.ok_or_else(incomplete)?,
    })
}

/// One `Attribute ::= SEQUENCE { attrType OID, attrValues SET }`.
///
/// Returns the presence bit for recognized attribute types (zero for
/// unrecognized ones, which are skipped, not rejected), plus the extracted
/// message digest or signing time where the type carries one.
fn authenticated_attribute<'a>(
    node: &TlvNode<'a>,
) -> Result<(u8, Option<&'a [u8]>, Option<i64>)> {
    let mut pair = node.descend()?;
    let attr_type = pair.consume_primitive()?;
    let values = pair.next()?;
    if pair.remaining() != 0 {
        return Err(Error::new(ErrorKind::GrammarMismatch, pair.offset()));
    }
    let Some(attr_oid) = oid::decode(attr_type) else {
        return Ok((0, None, None));
    };

    if attr_oid == oid::ATTR_CONTENT_TYPE {
        Ok((AA_CONTENT_TYPE, None, None))
    } else if attr_oid == oid::ATTR_MESSAGE_DIGEST {
        let digest = values.descend()?.consume_primitive()?;
        Ok((AA_MESSAGE_DIGEST, Some(digest), None))
    } else if attr_oid == oid::ATTR_SIGNING_TIME {
        let time_node = values.descend()?.next()?;
        Ok((AA_SIGNING_TIME, None, Some(x509::decode_time(&time_node)?)))
    } else if attr_oid == oid::ATTR_SMIME_CAPS
        || attr_oid == oid::ATTR_MS_OPUS_INFO
        || attr_oid == oid::ATTR_MS_STATEMENT_TYPE
    {
        Ok((AA_EXTENSION, None, None))
    } else {
        Ok((0, None, None))
    }
}
