//! Macro for implementing stable string keys for domain enums
//!
//! Enums that cross the persistence or configuration boundary (document
//! field keys, categories, swipe directions) need one canonical string form.
//! This macro generates it once instead of hand-writing `Display`/`FromStr`
//! pairs per enum.
//!
//! # Example
//!
//! ```rust
//! use kindred_domain::impl_domain_key_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tab {
//!     Social,
//!     Professional,
//! }
//!
//! impl_domain_key_conversions!(Tab {
//!     Social => "social",
//!     Professional => "professional",
//! });
//!
//! assert_eq!(Tab::Social.as_key(), "social");
//! assert_eq!("PROFESSIONAL".parse::<Tab>().unwrap(), Tab::Professional);
//! ```

/// Implements `ALL`, `as_key`, `Display` and `FromStr` for a `Copy` enum.
///
/// Parsing is case-insensitive; display always yields the canonical key.
#[macro_export]
macro_rules! impl_domain_key_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical string key for this variant.
            pub fn as_key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_key())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_key().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
