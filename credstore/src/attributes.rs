//! Typed attribute setters, scoped by category.
//!
//! Setters legal for every category live on `Query<C, P>`; category-specific
//! setters live on the concrete category's query type only, so an
//! out-of-scope setter (say, `with_server` on a generic password) does not
//! compile. The generic `set_attribute` on [`Query`] remains available as an
//! escape hatch for callers working with dynamic keys; those defer scope
//! errors to the backend.
//!
//! ```compile_fail
//! use credstore::GENERIC_PASSWORD;
//!
//! // `with_server` only exists for internet passwords.
//! GENERIC_PASSWORD.query().with_server("example.com");
//! ```

use crate::category::{Category, CryptoKey, GenericPassword, InternetPassword};
use crate::key::AttributeKey;
use crate::query::{Phase, Query};
use crate::value::{
    Accessibility, AuthenticationScheme, KeyAlgorithm, KeyClass, NetworkProtocol, Payload,
    Synchronizability, Value,
};

// Setters legal for every category.
impl<C: Category, P: Phase> Query<C, P> {
    /// Sets the user-visible label.
    #[must_use]
    pub fn with_label<S: Into<String>>(&self, label: S) -> Self {
        self.set_attribute(AttributeKey::Label, Value::Text(label.into()))
    }

    /// Sets the access group.
    #[must_use]
    pub fn with_access_group<S: Into<String>>(&self, group: S) -> Self {
        self.set_attribute(AttributeKey::AccessGroup, Value::Text(group.into()))
    }

    /// Sets the accessibility level.
    #[must_use]
    pub fn with_accessibility(&self, accessibility: Accessibility) -> Self {
        self.set_attribute(
            AttributeKey::Accessibility,
            Value::Accessibility(accessibility),
        )
    }
}

macro_rules! password_setters {
    () => {
        /// Sets the account name.
        #[must_use]
        pub fn with_account<S: Into<String>>(&self, account: S) -> Self {
            self.set_attribute(AttributeKey::Account, Value::Text(account.into()))
        }

        /// Sets the creation timestamp (Unix seconds).
        #[must_use]
        pub fn with_creation_date(&self, timestamp: i64) -> Self {
            self.set_attribute(AttributeKey::CreationDate, Value::Timestamp(timestamp))
        }

        /// Sets the last-modification timestamp (Unix seconds).
        #[must_use]
        pub fn with_modification_date(&self, timestamp: i64) -> Self {
            self.set_attribute(AttributeKey::ModificationDate, Value::Timestamp(timestamp))
        }

        /// Sets the user-visible description.
        #[must_use]
        pub fn with_description<S: Into<String>>(&self, description: S) -> Self {
            self.set_attribute(AttributeKey::Description, Value::Text(description.into()))
        }

        /// Sets the user-editable comment.
        #[must_use]
        pub fn with_comment<S: Into<String>>(&self, comment: S) -> Self {
            self.set_attribute(AttributeKey::Comment, Value::Text(comment.into()))
        }

        /// Sets the creator code.
        #[must_use]
        pub fn with_creator(&self, creator: i64) -> Self {
            self.set_attribute(AttributeKey::Creator, Value::Integer(creator))
        }

        /// Sets the item type code.
        #[must_use]
        pub fn with_item_type(&self, item_type: i64) -> Self {
            self.set_attribute(AttributeKey::ItemType, Value::Integer(item_type))
        }

        /// Marks the item as hidden from listings.
        #[must_use]
        pub fn with_invisible(&self, invisible: bool) -> Self {
            self.set_attribute(AttributeKey::Invisible, Value::Boolean(invisible))
        }

        /// Marks the item as a placeholder with no usable secret.
        #[must_use]
        pub fn with_negative(&self, negative: bool) -> Self {
            self.set_attribute(AttributeKey::Negative, Value::Boolean(negative))
        }

        /// Sets whether the item synchronizes across devices.
        #[must_use]
        pub fn with_synchronizable(&self, synchronizable: Synchronizability) -> Self {
            self.set_attribute(
                AttributeKey::Synchronizable,
                Value::Synchronizability(synchronizable),
            )
        }
    };
}

// Setters legal only for generic passwords.
impl<P: Phase> Query<GenericPassword, P> {
    password_setters!();

    /// Sets the service the password belongs to.
    #[must_use]
    pub fn with_service<S: Into<String>>(&self, service: S) -> Self {
        self.set_attribute(AttributeKey::Service, Value::Text(service.into()))
    }

    /// Sets the opaque user-defined bytes.
    #[must_use]
    pub fn with_generic_data<T: Into<Payload>>(&self, data: T) -> Self {
        self.set_attribute(AttributeKey::Generic, Value::Bytes(data.into()))
    }
}

// Setters legal only for internet passwords.
impl<P: Phase> Query<InternetPassword, P> {
    password_setters!();

    /// Sets the security domain.
    #[must_use]
    pub fn with_security_domain<S: Into<String>>(&self, domain: S) -> Self {
        self.set_attribute(AttributeKey::SecurityDomain, Value::Text(domain.into()))
    }

    /// Sets the server host name.
    #[must_use]
    pub fn with_server<S: Into<String>>(&self, server: S) -> Self {
        self.set_attribute(AttributeKey::Server, Value::Text(server.into()))
    }

    /// Sets the network protocol.
    #[must_use]
    pub fn with_protocol(&self, protocol: NetworkProtocol) -> Self {
        self.set_attribute(AttributeKey::Protocol, Value::Protocol(protocol))
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub fn with_authentication_scheme(&self, scheme: AuthenticationScheme) -> Self {
        self.set_attribute(
            AttributeKey::AuthenticationScheme,
            Value::AuthenticationScheme(scheme),
        )
    }

    /// Sets the server port.
    #[must_use]
    pub fn with_port(&self, port: u16) -> Self {
        self.set_attribute(AttributeKey::Port, Value::Integer(i64::from(port)))
    }

    /// Sets the path on the server.
    #[must_use]
    pub fn with_path<S: Into<String>>(&self, path: S) -> Self {
        self.set_attribute(AttributeKey::Path, Value::Text(path.into()))
    }
}

// Setters legal only for key items.
impl<P: Phase> Query<CryptoKey, P> {
    /// Sets the key class.
    #[must_use]
    pub fn with_key_class(&self, class: KeyClass) -> Self {
        self.set_attribute(AttributeKey::KeyClass, Value::KeyClass(class))
    }

    /// Sets the application-specific label bytes.
    #[must_use]
    pub fn with_application_label<T: Into<Payload>>(&self, label: T) -> Self {
        self.set_attribute(AttributeKey::ApplicationLabel, Value::Bytes(label.into()))
    }

    /// Sets the application-specific tag bytes.
    #[must_use]
    pub fn with_application_tag<T: Into<Payload>>(&self, tag: T) -> Self {
        self.set_attribute(AttributeKey::ApplicationTag, Value::Bytes(tag.into()))
    }

    /// Sets whether the key is stored permanently.
    #[must_use]
    pub fn with_permanent(&self, permanent: bool) -> Self {
        self.set_attribute(AttributeKey::Permanent, Value::Boolean(permanent))
    }

    /// Sets the key algorithm.
    #[must_use]
    pub fn with_key_algorithm(&self, algorithm: KeyAlgorithm) -> Self {
        self.set_attribute(AttributeKey::KeyAlgorithm, Value::KeyAlgorithm(algorithm))
    }

    /// Sets the nominal key size in bits.
    #[must_use]
    pub fn with_key_size_bits(&self, bits: i64) -> Self {
        self.set_attribute(AttributeKey::KeySizeBits, Value::Integer(bits))
    }

    /// Sets the effective key size in bits.
    #[must_use]
    pub fn with_effective_key_size(&self, bits: i64) -> Self {
        self.set_attribute(AttributeKey::EffectiveKeySize, Value::Integer(bits))
    }

    /// Sets whether the key can encrypt.
    #[must_use]
    pub fn with_can_encrypt(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanEncrypt, Value::Boolean(can))
    }

    /// Sets whether the key can decrypt.
    #[must_use]
    pub fn with_can_decrypt(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanDecrypt, Value::Boolean(can))
    }

    /// Sets whether the key can derive other keys.
    #[must_use]
    pub fn with_can_derive(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanDerive, Value::Boolean(can))
    }

    /// Sets whether the key can sign.
    #[must_use]
    pub fn with_can_sign(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanSign, Value::Boolean(can))
    }

    /// Sets whether the key can verify signatures.
    #[must_use]
    pub fn with_can_verify(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanVerify, Value::Boolean(can))
    }

    /// Sets whether the key can wrap other keys.
    #[must_use]
    pub fn with_can_wrap(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanWrap, Value::Boolean(can))
    }

    /// Sets whether the key can unwrap other keys.
    #[must_use]
    pub fn with_can_unwrap(&self, can: bool) -> Self {
        self.set_attribute(AttributeKey::CanUnwrap, Value::Boolean(can))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CRYPTO_KEY, GENERIC_PASSWORD, INTERNET_PASSWORD};

    #[test]
    fn test_common_setters_exist_on_every_category() {
        let generic = GENERIC_PASSWORD.query().with_label("a");
        let internet = INTERNET_PASSWORD.query().with_label("b");
        assert_eq!(
            generic.selector().attribute(AttributeKey::Label),
            Some(&Value::Text("a".to_string()))
        );
        assert_eq!(
            internet.selector().attribute(AttributeKey::Label),
            Some(&Value::Text("b".to_string()))
        );
    }

    #[test]
    fn test_generic_password_setters() {
        let query = GENERIC_PASSWORD
            .query()
            .with_service("svc")
            .with_account("alice")
            .with_generic_data(Payload::from("blob"))
            .with_synchronizable(Synchronizability::Local);
        assert_eq!(
            query.selector().attribute(AttributeKey::Service),
            Some(&Value::Text("svc".to_string()))
        );
        assert_eq!(
            query.selector().attribute(AttributeKey::Synchronizable),
            Some(&Value::Synchronizability(Synchronizability::Local))
        );
    }

    #[test]
    fn test_internet_password_setters() {
        let query = INTERNET_PASSWORD
            .query()
            .with_server("example.com")
            .with_port(8443)
            .with_protocol(NetworkProtocol::Https)
            .with_authentication_scheme(AuthenticationScheme::HttpBasic)
            .with_path("/login");
        assert_eq!(
            query.selector().attribute(AttributeKey::Port),
            Some(&Value::Integer(8443))
        );
        assert_eq!(
            query.selector().attribute(AttributeKey::Protocol),
            Some(&Value::Protocol(NetworkProtocol::Https))
        );
    }

    #[test]
    fn test_crypto_key_setters() {
        let query = CRYPTO_KEY
            .query()
            .with_key_class(KeyClass::Symmetric)
            .with_key_algorithm(KeyAlgorithm::Aes)
            .with_key_size_bits(256)
            .with_can_encrypt(true)
            .with_can_sign(false);
        assert_eq!(
            query.selector().attribute(AttributeKey::KeyClass),
            Some(&Value::KeyClass(KeyClass::Symmetric))
        );
        assert_eq!(
            query.selector().attribute(AttributeKey::KeySizeBits),
            Some(&Value::Integer(256))
        );
        assert_eq!(
            query.selector().attribute(AttributeKey::CanSign),
            Some(&Value::Boolean(false))
        );
    }

    #[test]
    fn test_setters_survive_phase_transitions() {
        let search = GENERIC_PASSWORD
            .query()
            .with_service("svc")
            .for_search()
            .with_account("alice");
        assert_eq!(
            search.selector().attribute(AttributeKey::Service),
            Some(&Value::Text("svc".to_string()))
        );
        assert_eq!(
            search.selector().attribute(AttributeKey::Account),
            Some(&Value::Text("alice".to_string()))
        );
    }
}
