//! Declarative macros for closed enumerations and UUID identifiers.

/// Declare a closed enumeration backed by stable snake_case strings.
///
/// The generated type exposes `VALUES`, `values()`, `as_str()`, `Display`,
/// `FromStr` failing with `InvalidValue::UnknownVariant`, and serde support
/// through its string form.
macro_rules! define_value_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident($kind:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every accepted variant, in declaration order.
            pub const VALUES: &'static [Self] = &[$(Self::$variant),+];

            /// String forms of every accepted variant.
            pub fn values() -> impl Iterator<Item = &'static str> {
                Self::VALUES.iter().map(|value| value.as_str())
            }

            /// Stable string form used in storage and transport.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::validation::InvalidValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err($crate::domain::validation::InvalidValue::UnknownVariant {
                        kind: $kind,
                        input: value.to_owned(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::validation::InvalidValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }
    };
}

/// Declare a UUID v4 identifier newtype.
///
/// String input must be a UUID v4; `from_uuid` trusts values that were
/// already validated, such as rows read back from storage.
macro_rules! define_id {
    (
        $(#[$outer:meta])*
        pub struct $name:ident($field:literal);
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Validate and construct the identifier from its string form.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::validation::InvalidValue> {
                let raw = id.as_ref();
                if raw.trim().is_empty() {
                    return Err($crate::domain::validation::InvalidValue::Empty { field: $field });
                }
                let parsed = ::uuid::Uuid::parse_str(raw).map_err(|_| {
                    $crate::domain::validation::InvalidValue::InvalidId { field: $field }
                })?;
                if parsed.get_version() != Some(::uuid::Version::Random) {
                    return Err($crate::domain::validation::InvalidValue::InvalidId { field: $field });
                }
                Ok(Self(parsed))
            }

            /// Wrap an already trusted UUID.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::validation::InvalidValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::validation::InvalidValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }
    };
}

pub(crate) use define_id;
pub(crate) use define_value_enum;
