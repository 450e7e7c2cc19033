//! The "enum or string" representation used throughout the payment request.
//!
//! Several request fields accept either a member of a closed enumeration or the
//! equivalent string literal, and the host may start accepting new values
//! before this crate learns about them. [`OpenEnum`] keeps both forms
//! interchangeable: a string naming a known member always normalizes to
//! [`OpenEnum::Known`], anything else is preserved verbatim as
//! [`OpenEnum::Unknown`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A closed enumeration with a fixed textual wire name per member.
///
/// Members are listed in declaration order; a member's position in
/// [`WireEnum::MEMBERS`] is its ordinal, which is how script callers
/// sometimes pass enum values.
pub trait WireEnum: Copy + Eq + Sized + 'static {
    /// Human-readable name of the enumeration, used in error messages.
    const NAME: &'static str;

    /// All members in declaration order.
    const MEMBERS: &'static [Self];

    /// Returns the wire name of this member.
    fn as_str(&self) -> &'static str;

    /// Looks up a member by its wire name.
    #[must_use]
    fn from_wire(value: &str) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.as_str() == value)
    }

    /// Looks up a member by its declaration ordinal.
    #[must_use]
    fn from_ordinal(ordinal: u64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::MEMBERS.get(i).copied())
    }

    /// Returns the declaration ordinal of this member.
    #[must_use]
    fn ordinal(&self) -> usize {
        Self::MEMBERS
            .iter()
            .position(|m| m == self)
            .unwrap_or_default()
    }
}

/// Either a known member of `T` or a string the host may understand.
///
/// Equality and hashing compare the wire text, so
/// `OpenEnum::Known(ContactField::Name)` equals `OpenEnum::from("name")`.
///
/// # Serialization
///
/// Serializes as the bare wire string. Deserializes from a string or from a
/// member ordinal; an ordinal outside the member range is rejected.
#[derive(Debug, Clone)]
pub enum OpenEnum<T> {
    /// A member of the closed enumeration.
    Known(T),
    /// A value not (yet) enumerated, kept verbatim.
    Unknown(String),
}

impl<T: WireEnum> OpenEnum<T> {
    /// Parses a string, normalizing known wire names to [`OpenEnum::Known`].
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        T::from_wire(&value).map_or(Self::Unknown(value), Self::Known)
    }

    /// Returns the wire text of this value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(member) => member.as_str(),
            Self::Unknown(value) => value,
        }
    }

    /// Returns the known member, if this value names one.
    #[must_use]
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(member) => Some(*member),
            Self::Unknown(value) => T::from_wire(value),
        }
    }

    /// Returns `true` if this value names a member of `T`.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.known().is_some()
    }
}

impl<T: WireEnum> From<T> for OpenEnum<T> {
    fn from(member: T) -> Self {
        Self::Known(member)
    }
}

impl<T: WireEnum> From<&str> for OpenEnum<T> {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl<T: WireEnum> From<String> for OpenEnum<T> {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl<T: WireEnum> PartialEq for OpenEnum<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: WireEnum> Eq for OpenEnum<T> {}

impl<T: WireEnum> PartialEq<T> for OpenEnum<T> {
    fn eq(&self, other: &T) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: WireEnum> PartialEq<str> for OpenEnum<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: WireEnum> PartialEq<&str> for OpenEnum<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: WireEnum> Hash for OpenEnum<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: WireEnum> fmt::Display for OpenEnum<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: WireEnum> Serialize for OpenEnum<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: WireEnum> Deserialize<'de> for OpenEnum<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OpenEnumVisitor(PhantomData))
    }
}

struct OpenEnumVisitor<T>(PhantomData<T>);

impl<T: WireEnum> Visitor<'_> for OpenEnumVisitor<T> {
    type Value = OpenEnum<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} name or ordinal", T::NAME)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(OpenEnum::parse(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(OpenEnum::parse(value))
    }

    fn visit_u64<E: de::Error>(self, ordinal: u64) -> Result<Self::Value, E> {
        T::from_ordinal(ordinal).map(OpenEnum::Known).ok_or_else(|| {
            E::custom(format!("{} has no member with ordinal {ordinal}", T::NAME))
        })
    }

    fn visit_i64<E: de::Error>(self, ordinal: i64) -> Result<Self::Value, E> {
        let ordinal = u64::try_from(ordinal)
            .map_err(|_| E::custom(format!("negative {} ordinal {ordinal}", T::NAME)))?;
        self.visit_u64(ordinal)
    }
}

/// Deserializes a closed enumeration, rejecting names it does not enumerate.
pub(crate) fn deserialize_closed<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: WireEnum,
    D: Deserializer<'de>,
{
    match OpenEnum::<T>::deserialize(deserializer)? {
        OpenEnum::Known(member) => Ok(member),
        OpenEnum::Unknown(value) => Err(de::Error::custom(format!(
            "unknown {} value: {value}",
            T::NAME
        ))),
    }
}
