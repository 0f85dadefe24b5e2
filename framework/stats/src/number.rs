use std::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// A numeric stat value as printed by the tool.
///
/// Whether a value is an integer or a float is decided lexically by [Number::parse_literal], not
/// by the magnitude of the value. The normalized schema depends on this distinction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Classify and parse a cleaned numeric literal.
    ///
    /// A literal containing a `.` is a float, anything else is an integer. Integers too large for
    /// an `i64` saturate to [i64::MAX]. Returns `None` if the literal does not parse as the chosen
    /// type, e.g. `1.2.3` or an empty string.
    pub fn parse_literal(literal: &str) -> Option<Self> {
        if literal.contains('.') {
            return literal.parse::<f64>().ok().map(Number::Float);
        }

        match literal.parse::<i64>() {
            Ok(v) => Some(Number::Int(v)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                log::debug!("Integer literal '{literal}' overflows, saturating to {}", i64::MAX);
                Some(Number::Int(i64::MAX))
            }
            Err(_) => None,
        }
    }

    /// Integer view of the value. Floats are truncated towards zero.
    pub fn as_int(&self) -> i64 {
        match *self {
            Number::Int(v) => v,
            Number::Float(v) => v as i64,
        }
    }

    /// Float view of the value.
    pub fn as_float(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}
