//! DER decoders for firmware-signing artifacts.
//!
//! Decodes the three binary structures a secure-boot verification pipeline
//! consumes: X.509 certificates, PKCS#7 signed messages and raw RSA public
//! key blobs. Input is treated as adversarial throughout: every declared
//! length is validated against the physical buffer before anything is
//! dereferenced, and only canonical DER is accepted (alternate BER
//! encodings of the same value are a parser-differential attack surface
//! and fail with [`ErrorKind::UnsupportedEncoding`]).
//!
//! The decoded records borrow from the input buffer and are immutable once
//! returned. Parsing is synchronous and allocation-light; independent
//! buffers may be parsed concurrently without coordination.
//!
//! Cryptography is out of scope: hashes and signature math operate on the
//! decoded material elsewhere.
//!
//! ```
//! use bootsig::parse_rsa_public_key;
//!
//! // SEQUENCE { modulus INTEGER, publicExponent INTEGER }
//! let blob = [
//!     0x30, 0x0a, 0x02, 0x03, 0x00, 0xbc, 0x61, 0x02, 0x03, 0x01, 0x00,
//!     0x01,
//! ];
//! let key = parse_rsa_public_key(&blob)?;
//! assert_eq!(key.algorithm, "rsa");
//! assert_eq!(key.exponent, [0x01, 0x00, 0x01]);
//! # Ok::<(), bootsig::Error>(())
//! ```

pub mod asn1;
mod error;
pub mod oid;
mod pkcs7;
mod rsa;
mod x509;

pub use self::{
    error::{Error, ErrorKind, Result},
    pkcs7::{
        parse_pkcs7_message, Pkcs7Message, SignerInfo, AA_CONTENT_TYPE, AA_EXTENSION,
        AA_MESSAGE_DIGEST, AA_SIGNING_TIME,
    },
    rsa::{parse_rsa_public_key, PublicKey},
    x509::{parse_certificate, Certificate},
};
