//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive monetary amounts where
//! required, non-empty reference codes) so that once a value reaches the
//! domain layer it can be treated as trusted.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided monetary amount is not representable.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Monetary amount stored in minor units (cents).
///
/// JSON payloads carry decimal numbers; they are converted with rounding at
/// the boundary and rejected when not finite or out of range. Arithmetic on
/// minor units keeps the recovery bookkeeping exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Wraps a raw amount of minor units (DB boundary).
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw amount of minor units backing this value.
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Converts a decimal amount (e.g. from a JSON body) into minor units.
    pub fn try_from_decimal(value: f64) -> Result<Self, TypeConstraintError> {
        if !value.is_finite() {
            return Err(TypeConstraintError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        let minor = (value * 100.0).round();
        if minor.abs() >= i64::MAX as f64 {
            return Err(TypeConstraintError::InvalidAmount(format!(
                "{value} is out of range"
            )));
        }
        Ok(Self(minor as i64))
    }

    /// Decimal representation used on the JSON boundary.
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Clamps negative amounts to zero, used for report display.
    pub fn clamp_to_zero(self) -> Self {
        Self(self.0.max(0))
    }

    /// Overflow-checked addition in minor units.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Overflow-checked multiplication by a unitless factor (quantities).
    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Saturating subtraction, for display fallbacks where clamping beats
    /// failing.
    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from_decimal(value).map_err(serde::de::Error::custom)
    }
}

/// Commercial reference code ("Cref"), trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cref(String);

impl Cref {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Cref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cref {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Cref {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cref> for String {
    fn from(value: Cref) -> Self {
        value.0
    }
}
