//! Type-safe operator and variable types for rpmreqs
//!
//! Markers and specifiers arrive with string operators. This module replaces
//! them with closed enums so every translation pass matches exhaustively.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Comparison operator of a single PEP 508 marker clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
pub enum MarkerOperator {
    #[strum(serialize = "==")]
    #[serde(rename = "==")]
    Equal,
    #[strum(serialize = "===")]
    #[serde(rename = "===")]
    ArbitraryEqual,
    #[strum(serialize = "!=")]
    #[serde(rename = "!=")]
    NotEqual,
    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    Less,
    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessEqual,
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Greater,
    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterEqual,
    #[strum(serialize = "~=")]
    #[serde(rename = "~=")]
    Compatible,
    #[strum(serialize = "in")]
    #[serde(rename = "in")]
    In,
    #[strum(serialize = "not in")]
    #[serde(rename = "not in")]
    NotIn,
}

impl MarkerOperator {
    /// RPM comparison operator for the directly-mapped operators.
    ///
    /// | Marker | RPM |
    /// |--------|-----|
    /// | `==`, `===` | `=` |
    /// | `<`, `<=`, `>=`, `>` | unchanged |
    ///
    /// Everything else needs a dedicated rendering and returns `None`.
    pub fn rpm_operator(&self) -> Option<&'static str> {
        match self {
            Self::Equal | Self::ArbitraryEqual => Some("="),
            Self::Less => Some("<"),
            Self::LessEqual => Some("<="),
            Self::GreaterEqual => Some(">="),
            Self::Greater => Some(">"),
            Self::NotEqual | Self::Compatible | Self::In | Self::NotIn => None,
        }
    }
}

/// Operator of a single PEP 440 version specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
pub enum SpecifierOperator {
    #[strum(serialize = "==")]
    #[serde(rename = "==")]
    Equal,
    #[strum(serialize = "===")]
    #[serde(rename = "===")]
    ArbitraryEqual,
    #[strum(serialize = "!=")]
    #[serde(rename = "!=")]
    NotEqual,
    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    Less,
    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessEqual,
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Greater,
    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterEqual,
    #[strum(serialize = "~=")]
    #[serde(rename = "~=")]
    Compatible,
}

impl SpecifierOperator {
    /// RPM comparison operator, same correspondence as [`MarkerOperator::rpm_operator`]
    pub fn rpm_operator(&self) -> Option<&'static str> {
        match self {
            Self::Equal | Self::ArbitraryEqual => Some("="),
            Self::Less => Some("<"),
            Self::LessEqual => Some("<="),
            Self::GreaterEqual => Some(">="),
            Self::Greater => Some(">"),
            Self::NotEqual | Self::Compatible => None,
        }
    }
}

/// Boolean connective between marker sub-expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Connective {
    And,
    Or,
}

/// Marker variables with an RPM rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerVariable {
    /// CPU architecture (`uname -m`)
    PlatformMachine,
    PythonFullVersion,
    PythonVersion,
    ImplementationVersion,
    /// Kernel release
    PlatformRelease,
}

/// How a marker variable is rendered in RPM syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableCategory {
    /// Rendered through the architecture template
    Architecture,
    /// Rendered as a versioned requirement on the interpreter ABI token
    Interpreter,
    /// Rendered as a versioned requirement on `kernel`
    KernelRelease,
}

impl MarkerVariable {
    pub fn category(&self) -> VariableCategory {
        match self {
            Self::PlatformMachine => VariableCategory::Architecture,
            Self::PythonFullVersion | Self::PythonVersion | Self::ImplementationVersion => {
                VariableCategory::Interpreter
            }
            Self::PlatformRelease => VariableCategory::KernelRelease,
        }
    }
}

/// Marker variable naming a requested extra
pub const EXTRA_VARIABLE: &str = "extra";

/// Environment key listing the extras of each build variant
pub const EXTRAS_KEY: &str = "extras";

/// Check whether a marker variable refers to extras
pub fn is_extras_variable(variable: &str) -> bool {
    variable == EXTRA_VARIABLE || variable == EXTRAS_KEY
}
