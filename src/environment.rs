//! Known build environments.
//!
//! Each key is a PEP 508 environment variable. A single value means every
//! build sees that value; a list means the package is built once per value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{EXTRA_VARIABLE, EXTRAS_KEY, is_extras_variable};

/// Value(s) of one environment variable across the builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Single(String),
    Many(Vec<String>),
}

impl EnvValue {
    /// Candidate values to evaluate a comparison against
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for EnvValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Map from environment variable to its known value(s)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environments {
    values: BTreeMap<String, EnvValue>,
}

impl Environments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, variable: impl Into<String>, value: impl Into<EnvValue>) -> Self {
        self.insert(variable, value);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, value: impl Into<EnvValue>) {
        self.values.insert(variable.into(), value.into());
    }

    pub fn get(&self, variable: &str) -> Option<&EnvValue> {
        self.values.get(variable)
    }

    /// Look up the value(s) a marker variable is evaluated against.
    ///
    /// `extra` markers read the `extras` entry, falling back to `extra`.
    pub fn lookup(&self, variable: &str) -> Option<&EnvValue> {
        if is_extras_variable(variable) {
            self.values
                .get(EXTRAS_KEY)
                .or_else(|| self.values.get(EXTRA_VARIABLE))
        } else {
            self.values.get(variable)
        }
    }

    /// Overlay `other` on top of `self`, replacing the keys it names
    pub fn merge(&mut self, other: &Environments) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
