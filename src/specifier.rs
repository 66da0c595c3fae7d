//! PEP 440 version specifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RpmReqsError};
use crate::types::SpecifierOperator;

/// Operator tokens, longest first so `===` is not read as `==`
const OPERATOR_TOKENS: [&str; 8] = ["===", "==", "~=", "!=", "<=", ">=", "<", ">"];

/// One operator + version clause, e.g. `>=1.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specifier {
    pub operator: SpecifierOperator,
    pub version: String,
}

impl Specifier {
    pub fn new(operator: SpecifierOperator, version: impl Into<String>) -> Self {
        Self {
            operator,
            version: version.into(),
        }
    }
}

impl FromStr for Specifier {
    type Err = RpmReqsError;

    /// Split a single `"<op><version>"` clause
    fn from_str(s: &str) -> Result<Self> {
        let clause = s.trim();
        let token = OPERATOR_TOKENS
            .iter()
            .find(|token| clause.starts_with(*token))
            .ok_or_else(|| RpmReqsError::InvalidSpecifier(format!("no operator in '{clause}'")))?;
        let version = clause[token.len()..].trim();
        if version.is_empty() {
            return Err(RpmReqsError::InvalidSpecifier(format!(
                "no version in '{clause}'"
            )));
        }
        let operator = SpecifierOperator::from_str(token)
            .map_err(|e| RpmReqsError::InvalidSpecifier(format!("'{clause}': {e}")))?;
        Ok(Self::new(operator, version))
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// Specifiers constraining one package, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from individual clauses such as `[">=1.0", "<2.0"]`
    pub fn parse_clauses<I, S>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        clauses
            .into_iter()
            .map(|clause| clause.as_ref().parse())
            .collect::<Result<Vec<_>>>()
            .map(|specifiers| Self { specifiers })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Specifier> {
        self.specifiers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }
}

impl FromIterator<Specifier> for SpecifierSet {
    fn from_iter<T: IntoIterator<Item = Specifier>>(iter: T) -> Self {
        Self {
            specifiers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SpecifierSet {
    type Item = &'a Specifier;
    type IntoIter = std::slice::Iter<'a, Specifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.specifiers.iter()
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, specifier) in self.specifiers.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{specifier}")?;
        }
        Ok(())
    }
}
