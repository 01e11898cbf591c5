//! Validation combinators shared by value object constructors.
//!
//! Each check returns the single [`InvalidValue`] error type so constructors
//! can chain checks with `?` and stay declarative.

use std::sync::OnceLock;

use regex::Regex;

/// Failure raised when a value object rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidValue {
    /// A required value was empty once trimmed.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// The value is shorter than the allowed minimum.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    /// The value is longer than the allowed maximum.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// The value does not match the expected format.
    #[error("{field} has an invalid format")]
    InvalidFormat { field: &'static str },
    /// The value is not a member of a closed enumeration.
    #[error("unknown {kind}: {input}")]
    UnknownVariant { kind: &'static str, input: String },
    /// A numeric value is below zero.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    /// The currency code is not a supported ISO 4217 code.
    #[error("unknown currency code: {code}")]
    UnknownCurrency { code: String },
    /// A period ends before it starts.
    #[error("period must not end before it starts")]
    InvalidPeriod,
    /// A free pricing plan carries a non-zero price.
    #[error("free pricing plans must have a zero amount")]
    FreePlanWithPrice,
    /// An identifier is not a UUID v4.
    #[error("{field} must be a valid UUID v4")]
    InvalidId { field: &'static str },
}

impl InvalidValue {
    /// Name of the offending field, used in error details.
    pub fn field(&self) -> &str {
        match self {
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field }
            | Self::Negative { field }
            | Self::InvalidId { field } => field,
            Self::UnknownVariant { kind, .. } => kind,
            Self::UnknownCurrency { .. } => "currency",
            Self::InvalidPeriod => "period",
            Self::FreePlanWithPrice => "price",
        }
    }
}

/// Trim `value` and reject it when nothing remains.
pub(crate) fn required_text<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, InvalidValue> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InvalidValue::Empty { field });
    }
    Ok(trimmed)
}

/// Check that `value` holds between `min` and `max` characters inclusive.
pub(crate) fn bounded_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), InvalidValue> {
    let length = value.chars().count();
    if length < min {
        return Err(InvalidValue::TooShort { field, min });
    }
    if length > max {
        return Err(InvalidValue::TooLong { field, max });
    }
    Ok(())
}

/// Check that `value` matches `pattern` in full.
pub(crate) fn matching(
    field: &'static str,
    value: &str,
    pattern: &Regex,
) -> Result<(), InvalidValue> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(InvalidValue::InvalidFormat { field })
    }
}

/// Reject negative amounts.
pub(crate) fn non_negative(field: &'static str, value: i64) -> Result<i64, InvalidValue> {
    if value < 0 {
        return Err(InvalidValue::Negative { field });
    }
    Ok(value)
}

/// Parse an optional field. Blank input counts as absent.
pub(crate) fn optional<T>(
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, InvalidValue>,
) -> Result<Option<T>, InvalidValue> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(parse)
        .transpose()
}

/// Compile `pattern` once into `cell`.
pub(crate) fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
    })
}

/// Declare a trimmed, length-bounded text value object.
macro_rules! define_bounded_text {
    (
        $(#[$outer:meta])*
        pub struct $name:ident($field:literal, $min:expr, $max:expr);
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Minimum accepted length in characters.
            pub const MIN: usize = $min;
            /// Maximum accepted length in characters.
            pub const MAX: usize = $max;

            /// Validate and construct the value, trimming surrounding whitespace.
            pub fn new(
                value: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::validation::InvalidValue> {
                let trimmed = value.as_ref().trim();
                $crate::domain::validation::bounded_length($field, trimmed, Self::MIN, Self::MAX)?;
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::validation::InvalidValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_bounded_text;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab", Err(InvalidValue::TooShort { field: "name", min: 3 }))]
    #[case("abc", Ok(()))]
    #[case("abcdef", Err(InvalidValue::TooLong { field: "name", max: 5 }))]
    fn bounded_length_enforces_both_ends(
        #[case] input: &str,
        #[case] expected: Result<(), InvalidValue>,
    ) {
        assert_eq!(bounded_length("name", input, 3, 5), expected);
    }

    #[rstest]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("email", "  a@b.io "), Ok("a@b.io"));
        assert_eq!(
            required_text("email", "   "),
            Err(InvalidValue::Empty { field: "email" })
        );
    }

    #[rstest]
    fn non_negative_rejects_negative_amounts() {
        assert_eq!(non_negative("amount", 0), Ok(0));
        assert_eq!(
            non_negative("amount", -1),
            Err(InvalidValue::Negative { field: "amount" })
        );
    }

    #[rstest]
    fn optional_treats_blank_as_absent() {
        let parse = |raw: String| Ok::<_, InvalidValue>(raw.len());
        assert_eq!(optional(None, parse), Ok(None));
        assert_eq!(optional(Some("  ".to_owned()), parse), Ok(None));
        assert_eq!(optional(Some("abc".to_owned()), parse), Ok(Some(3)));
    }

    #[rstest]
    fn field_names_are_reported() {
        let error = InvalidValue::UnknownVariant {
            kind: "customer type",
            input: "club".to_owned(),
        };
        assert_eq!(error.field(), "customer type");
        assert_eq!(error.to_string(), "unknown customer type: club");
    }
}
