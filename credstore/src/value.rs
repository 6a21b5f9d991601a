//! Typed values an attribute can hold.
//!
//! [`Value`] is a closed union over the representations the backend
//! understands. Typed constructors are total over their declared input; the
//! only fallible path is [`Value::from_untyped`], which converts a
//! loosely-typed input and rejects anything outside the supported primitive
//! kinds immediately instead of deferring the failure to a backend round
//! trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::category::CategoryId;
use crate::error::{CredStoreResult, StatusError};

/// An opaque byte buffer holding secret material.
///
/// Zeroized on drop. The `Debug` form never prints the contents.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Wraps raw bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns a copy of the raw bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }

    /// Returns the number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload(<{} bytes>)", self.0.len())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// When a stored item is accessible.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// Accessible while the store is unlocked.
    WhenUnlocked,
    /// Accessible after the first unlock since boot.
    AfterFirstUnlock,
    /// Like `WhenUnlocked`, but never leaves the device.
    WhenUnlockedThisDeviceOnly,
    /// Like `AfterFirstUnlock`, but never leaves the device.
    AfterFirstUnlockThisDeviceOnly,
    /// Accessible only while a passcode is set, never leaves the device.
    WhenPasscodeSetThisDeviceOnly,
}

/// Whether an item synchronizes across devices.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Synchronizability {
    /// The item synchronizes.
    Synchronizable,
    /// The item stays local.
    Local,
    /// Match both synchronizable and local items (search only).
    Any,
}

/// Network protocol of an internet password item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NetworkProtocol {
    /// HTTP.
    Http,
    /// HTTPS.
    Https,
    /// FTP.
    Ftp,
    /// FTP over TLS.
    Ftps,
    /// SSH.
    Ssh,
    /// SMTP.
    Smtp,
    /// IMAP.
    Imap,
    /// POP3.
    Pop3,
    /// LDAP.
    Ldap,
    /// SOCKS proxy.
    Socks,
}

/// Authentication scheme of an internet password item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationScheme {
    /// Backend default.
    Default,
    /// HTTP Basic.
    HttpBasic,
    /// HTTP Digest.
    HttpDigest,
    /// HTML form-based.
    HtmlForm,
    /// NTLM.
    Ntlm,
    /// Negotiate (SPNEGO).
    Negotiate,
}

/// Class of a stored cryptographic key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KeyClass {
    /// Public half of an asymmetric key pair.
    Public,
    /// Private half of an asymmetric key pair.
    Private,
    /// Symmetric key.
    Symmetric,
}

/// Algorithm of a stored cryptographic key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KeyAlgorithm {
    /// RSA.
    Rsa,
    /// Elliptic curve.
    EllipticCurve,
    /// AES.
    Aes,
    /// HMAC.
    Hmac,
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// The item category. Only ever set by query construction.
    Category(CategoryId),
    /// UTF-8 text.
    Text(String),
    /// Opaque bytes.
    Bytes(Payload),
    /// Unix timestamp in seconds.
    Timestamp(i64),
    /// Boolean flag.
    Boolean(bool),
    /// Signed integer.
    Integer(i64),
    /// Accessibility level.
    Accessibility(Accessibility),
    /// Synchronizability.
    Synchronizability(Synchronizability),
    /// Network protocol.
    Protocol(NetworkProtocol),
    /// Authentication scheme.
    AuthenticationScheme(AuthenticationScheme),
    /// Key class.
    KeyClass(KeyClass),
    /// Key algorithm.
    KeyAlgorithm(KeyAlgorithm),
}

impl Value {
    /// Converts a loosely-typed input into a typed value.
    ///
    /// Supported inputs: strings, booleans, integers, and arrays of byte
    /// values. A `null` input is rejected right here rather than wrapped and
    /// deferred to the backend, where it would only surface after a full
    /// round trip.
    ///
    /// # Errors
    ///
    /// Returns a [`StatusError`] of kind `MissingRequiredAttribute` for
    /// `null`, and of kind `TypeMismatch` for every other unsupported shape
    /// (floats, objects, non-byte arrays).
    pub fn from_untyped(raw: &serde_json::Value) -> CredStoreResult<Self> {
        match raw {
            serde_json::Value::Null => Err(StatusError::missing_attribute(
                "attribute value is null",
            )),
            serde_json::Value::Bool(flag) => Ok(Self::Boolean(*flag)),
            serde_json::Value::Number(number) => number.as_i64().map(Self::Integer).ok_or_else(
                || StatusError::type_mismatch("numeric attribute value is not a signed integer"),
            ),
            serde_json::Value::String(text) => Ok(Self::Text(text.clone())),
            serde_json::Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    let byte = item
                        .as_u64()
                        .filter(|value| *value <= u64::from(u8::MAX))
                        .ok_or_else(|| {
                            StatusError::type_mismatch("array attribute value is not a byte buffer")
                        })?;
                    #[allow(clippy::cast_possible_truncation)]
                    bytes.push(byte as u8);
                }
                Ok(Self::Bytes(Payload::new(bytes)))
            }
            serde_json::Value::Object(_) => Err(StatusError::type_mismatch(
                "object attribute values are not supported",
            )),
        }
    }

    /// Returns the text content, if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the byte content, if this is a `Bytes` value.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Payload> {
        match self {
            Self::Bytes(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a `Boolean` value.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }
}
