//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Projecta IDs are
//! opaque strings (`"p1"`, `"p1718000000000"`, `"safty-band-1718000000000"`).

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `timestamped()` for `<prefix><unix millis>` identifiers
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use projecta_core::define_id;
/// define_id!(OrderId);
/// define_id!(InvoiceId);
///
/// let order_id = OrderId::new("o1");
/// let invoice_id = InvoiceId::new("o1");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = invoice_id;
/// assert_eq!(order_id.as_str(), invoice_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create an ID of the form `<prefix><unix millis>`.
            #[must_use]
            pub fn timestamped(prefix: &str) -> Self {
                Self(format!(
                    "{prefix}{}",
                    ::chrono::Utc::now().timestamp_millis()
                ))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns `true` if the ID is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CartLineId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_prefix() {
        let id = ProductId::timestamped("p");
        assert!(id.as_str().starts_with('p'));
        assert!(id.as_str()[1..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let id = CartLineId::new("safty-band-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"safty-band-1\"");

        let parsed: CartLineId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_is_blank() {
        assert!(ProductId::new("  ").is_blank());
        assert!(!ProductId::new("p1").is_blank());
    }
}
