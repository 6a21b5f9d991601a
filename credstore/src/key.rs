//! Keys of the flat selector mapping.
//!
//! A selector is a flat mapping from [`SelectorKey`] to a typed value. Keys
//! are pure identifiers; they carry no value and are never mutated. Some
//! attribute keys apply to every category, others are only legal for a
//! specific one — the typed setter methods on the query builder enforce that
//! scope at the type level.

use serde::{Deserialize, Serialize};

/// A named attribute slot on a credential item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    // Legal for every category.
    /// User-visible label.
    Label,
    /// Access group the item is shared with.
    AccessGroup,
    /// When the item is accessible (see `Accessibility`).
    Accessibility,

    // Legal for password categories.
    /// Account name.
    Account,
    /// Creation timestamp, Unix seconds.
    CreationDate,
    /// Last-modification timestamp, Unix seconds.
    ModificationDate,
    /// User-visible description.
    Description,
    /// User-editable comment.
    Comment,
    /// Creator code.
    Creator,
    /// Item type code.
    ItemType,
    /// Whether the item is hidden from listings.
    Invisible,
    /// Whether the item is a placeholder with no usable secret.
    Negative,
    /// Whether the item synchronizes across devices.
    Synchronizable,

    // Legal only for generic passwords.
    /// Service the password belongs to.
    Service,
    /// Opaque user-defined bytes.
    Generic,

    // Legal only for internet passwords.
    /// Security domain.
    SecurityDomain,
    /// Server host name.
    Server,
    /// Network protocol (see `NetworkProtocol`).
    Protocol,
    /// Authentication scheme (see `AuthenticationScheme`).
    AuthenticationScheme,
    /// Server port.
    Port,
    /// Path on the server.
    Path,

    // Legal only for key items.
    /// Key class (see `KeyClass`).
    KeyClass,
    /// Application-specific label bytes.
    ApplicationLabel,
    /// Application-specific tag bytes.
    ApplicationTag,
    /// Whether the key is stored permanently.
    Permanent,
    /// Key algorithm (see `KeyAlgorithm`).
    KeyAlgorithm,
    /// Nominal key size in bits.
    KeySizeBits,
    /// Effective key size in bits.
    EffectiveKeySize,
    /// Whether the key can encrypt.
    CanEncrypt,
    /// Whether the key can decrypt.
    CanDecrypt,
    /// Whether the key can derive other keys.
    CanDerive,
    /// Whether the key can sign.
    CanSign,
    /// Whether the key can verify signatures.
    CanVerify,
    /// Whether the key can wrap other keys.
    CanWrap,
    /// Whether the key can unwrap other keys.
    CanUnwrap,
}

/// Flags controlling what a search returns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnFlag {
    /// Return the item's raw secret bytes.
    Data,
    /// Return the item's attribute mapping.
    Attributes,
    /// Return an in-process reference to the item.
    Reference,
    /// Return a persistent reference usable across processes.
    PersistentReference,
}

/// Keys for the payload slots of a save or update.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ValueKey {
    /// The secret bytes to persist.
    Data,
    /// An in-process item reference.
    Reference,
    /// A persistent item reference.
    PersistentReference,
}

/// The flat wire key crossing the backend boundary.
///
/// The category entry is set once at query construction and is not
/// reachable from any attribute setter, so it can never be overwritten.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKey {
    /// The credential item category.
    Category,
    /// A named attribute slot.
    Attribute(AttributeKey),
    /// A search return flag.
    Return(ReturnFlag),
    /// A payload slot.
    Value(ValueKey),
}
