//! Newtype IDs for Slack object references.
//!
//! Slack identifies channels, files and lists with opaque strings such as
//! `C0123ABCD` or `F0456EFGH`. Use the `define_slack_id!` macro to create
//! wrappers that keep a list ID from being passed where a canvas ID belongs.

/// Macro to define a type-safe Slack ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use slack_clients_core::define_slack_id;
/// define_slack_id!(UserId);
/// define_slack_id!(TeamId);
///
/// let user = UserId::new("U0123");
/// let team = TeamId::new("T0456");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = team;
/// assert_eq!(user.as_str(), "U0123");
/// ```
#[macro_export]
macro_rules! define_slack_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_slack_id!(ChannelId);
define_slack_id!(CanvasId);
define_slack_id!(ListId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_id() {
        let id = ListId::new("F07ABCDEF");
        assert_eq!(id.to_string(), "F07ABCDEF");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ChannelId::from("C012345");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"C012345\"");

        let parsed: ChannelId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_string() {
        let id: CanvasId = String::from("F0CANVAS").into();
        assert_eq!(id.as_str(), "F0CANVAS");
    }
}
