//! Action arguments and the primitive validators every handler builds on.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;

/// A value drawn from a closed, named set (modes, fan speeds, keys, …).
pub trait Enumerated: Copy + fmt::Display + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Wire name of this member.
    fn as_str(self) -> &'static str;

    /// Look up a member by its wire name.
    #[must_use]
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == name)
    }
}

/// Inclusive bounds of a small integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u8,
    pub max: u8,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Check `candidate` against the bounds, narrowing it on success.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::OutOfRange`] when `candidate` lies outside.
    pub fn check(self, candidate: i64) -> Result<u8, ActionError> {
        u8::try_from(candidate)
            .ok()
            .filter(|value| (self.min..=self.max).contains(value))
            .ok_or_else(|| self.out_of_range())
    }

    #[must_use]
    pub fn out_of_range(self) -> ActionError {
        ActionError::OutOfRange {
            min: i64::from(self.min),
            max: i64::from(self.max),
        }
    }
}

/// Arguments supplied with an action call.
///
/// Callers may send the argument bare (`22`) or wrapped in a single-element
/// array (`[22]`); both are read the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionArgs(Value);

impl ActionArgs {
    /// Arguments for an action that takes none.
    #[must_use]
    pub fn none() -> Self {
        Self(Value::Null)
    }

    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// The raw JSON value, as received.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn first(&self) -> Option<&Value> {
        match &self.0 {
            Value::Null => None,
            Value::Array(items) => items.first().filter(|item| !item.is_null()),
            other => Some(other),
        }
    }

    /// Read an integer within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::OutOfRange`] when the argument is missing, not an
    /// integer, or outside the bounds.
    pub fn integer(&self, bounds: Bounds) -> Result<u8, ActionError> {
        let candidate = self
            .first()
            .and_then(integral)
            .ok_or_else(|| bounds.out_of_range())?;
        bounds.check(candidate)
    }

    /// Read a member of the enumerated set `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidArgument`] carrying every member of `T`
    /// when the argument is missing or not one of them.
    pub fn member<T: Enumerated>(&self) -> Result<T, ActionError> {
        self.text()
            .and_then(T::parse)
            .ok_or_else(|| ActionError::invalid_argument(T::ALL))
    }

    /// Read a string argument, if there is one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.first().and_then(Value::as_str)
    }
}

impl From<Value> for ActionArgs {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15)
            .map(|f| f as i64)
    })
}
