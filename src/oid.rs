//! Object-identifier registry.
//!
//! A process-wide, read-only table mapping encoded OIDs to canonical
//! algorithm names. Lookup never fails the parse: an unrecognized OID in a
//! field the caller does not verify against is legitimate, so it resolves
//! to the [`UNKNOWN`] sentinel instead.

use const_oid::ObjectIdentifier as Oid;

/// Sentinel name returned for OIDs the registry does not know.
pub const UNKNOWN: &str = "unknown";

pub const RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.1");
pub const SHA1_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA256_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.13");

pub const SHA1: Oid = Oid::new_unwrap("1.3.14.3.2.26");
pub const SHA256: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.1");
pub const SHA384: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.2");
pub const SHA512: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.3");

pub const PKCS7_DATA: Oid = Oid::new_unwrap("1.2.840.113549.1.7.1");
pub const PKCS7_SIGNED_DATA: Oid = Oid::new_unwrap("1.2.840.113549.1.7.2");
/// Microsoft SpcIndirectDataContent, the Authenticode detached payload.
pub const MS_INDIRECT_DATA: Oid = Oid::new_unwrap("1.3.6.1.4.1.311.2.1.4");

// PKCS#9 / vendor authenticated-attribute types.
pub const ATTR_CONTENT_TYPE: Oid = Oid::new_unwrap("1.2.840.113549.1.9.3");
pub const ATTR_MESSAGE_DIGEST: Oid = Oid::new_unwrap("1.2.840.113549.1.9.4");
pub const ATTR_SIGNING_TIME: Oid = Oid::new_unwrap("1.2.840.113549.1.9.5");
pub const ATTR_SMIME_CAPS: Oid = Oid::new_unwrap("1.2.840.113549.1.9.15");
pub const ATTR_MS_OPUS_INFO: Oid = Oid::new_unwrap("1.3.6.1.4.1.311.2.1.12");
pub const ATTR_MS_STATEMENT_TYPE: Oid = Oid::new_unwrap("1.3.6.1.4.1.311.2.1.11");

// X.520 attribute types rendered into subject/issuer strings.
pub const AT_COMMON_NAME: Oid = Oid::new_unwrap("2.5.4.3");
pub const AT_ORGANIZATION: Oid = Oid::new_unwrap("2.5.4.10");

/// Canonical algorithm and content-type names.
static NAMES: &[(Oid, &str)] = &[
    (RSA_ENCRYPTION, "rsa"),
    (SHA1_WITH_RSA, "rsa-sha1"),
    (SHA256_WITH_RSA, "rsa-sha256"),
    (SHA384_WITH_RSA, "rsa-sha384"),
    (SHA512_WITH_RSA, "rsa-sha512"),
    (SHA1, "sha1"),
    (SHA256, "sha256"),
    (SHA384, "sha384"),
    (SHA512, "sha512"),
    (PKCS7_DATA, "data"),
    (PKCS7_SIGNED_DATA, "signed-data"),
    (MS_INDIRECT_DATA, "ms-indirect-data"),
];

/// Decodes the content octets of an OBJECT IDENTIFIER node.
///
/// `None` for content that is not a well-formed OID; callers that merely
/// need a name treat that the same as an unrecognized identifier.
pub fn decode(value: &[u8]) -> Option<Oid> {
    Oid::from_bytes(value).ok()
}

/// Canonical name for an OID's content octets, or [`UNKNOWN`].
pub fn name(value: &[u8]) -> &'static str {
    decode(value)
        .and_then(|oid| {
            NAMES
                .iter()
                .find(|(known, _)| *known == oid)
                .map(|(_, name)| *name)
        })
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn known_oids_resolve() {
        // rsaEncryption, DER content octets.
        assert_eq!(name(&hex!("2a 86 48 86 f7 0d 01 01 01")), "rsa");
        // sha256.
        assert_eq!(name(&hex!("60 86 48 01 65 03 04 02 01")), "sha256");
        // sha256WithRSAEncryption.
        assert_eq!(name(&hex!("2a 86 48 86 f7 0d 01 01 0b")), "rsa-sha256");
    }

    #[test]
    fn unknown_oid_is_sentinel_not_error() {
        // id-ecPublicKey: recognized OID syntax, not in the registry.
        assert_eq!(name(&hex!("2a 86 48 ce 3d 02 01")), UNKNOWN);
        // Not even a valid OID encoding.
        assert_eq!(name(&hex!("ff ff ff")), UNKNOWN);
        assert_eq!(name(&[]), UNKNOWN);
    }
}
