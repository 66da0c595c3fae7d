//! Result of simplifying a marker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Either a fully determined boolean or a remaining RPM condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpmCondition {
    /// `true`: emit the dependency unconditionally. `false`: omit it.
    Const(bool),
    /// Condition in RPM spec syntax
    Expr(String),
}

impl RpmCondition {
    pub const TRUE: Self = Self::Const(true);
    pub const FALSE: Self = Self::Const(false);

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Const(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::Const(false))
    }
}

impl fmt::Display for RpmCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Expr(expr) => f.write_str(expr),
        }
    }
}
