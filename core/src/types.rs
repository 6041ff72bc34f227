//! Request payloads for the order and payment services.
//!
//! # Design
//! These mirror what the gateway accepts on its JSON routes. Identifiers are
//! kept as free text: the client never validates them, the services do.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric amount typed in by an operator.
///
/// Parsing follows the usual form-input coercion: whitespace is ignored,
/// empty text is zero and anything unparsable becomes NaN. On the wire an
/// integral value is written without a fraction (`50`, not `50.0`) and a
/// non-finite value is written as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Coerce operator input. Never fails.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self(0.0);
        }
        Self(trimmed.parse::<f64>().unwrap_or(f64::NAN))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `Some(n)` when the amount is a whole number that fits in an `i64`.
    fn as_integer(self) -> Option<i64> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Some(v as i64)
        } else {
            None
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl FromStr for Amount {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_integer() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(n) = self.as_integer() {
            serializer.serialize_i64(n)
        } else if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self(value.unwrap_or(f64::NAN)))
    }
}

/// Body of `POST /api/v1/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub user_id: String,
    pub description: String,
    pub amount: Amount,
}

/// Body of `POST /api/v1/payment/accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccount {
    pub user_id: String,
}

/// Body of `POST /api/v1/payment/accounts/{user_id}/deposit`. The user id
/// appears both in the path and in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub user_id: String,
    pub amount: Amount,
}
