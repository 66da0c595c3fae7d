//! Owned marker AST.
//!
//! Markers reach this crate already parsed. Whatever parser produced them,
//! it hands over this tree, so the translation passes never depend on a
//! parser's internal representation.
//!
//! # JSON shape
//!
//! ```json
//! { "group": [
//!     { "leaf": { "variable": "python_version", "operator": ">=", "value": "3.8" } },
//!     "and",
//!     { "const": true }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RpmReqsError};
use crate::types::{Connective, MarkerOperator};

/// A single comparison, e.g. `python_version >= "3.8"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerLeaf {
    pub variable: String,
    pub operator: MarkerOperator,
    pub value: String,
}

impl MarkerLeaf {
    pub fn new(
        variable: impl Into<String>,
        operator: MarkerOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for MarkerLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.variable, self.operator, self.value)
    }
}

/// Element of a [`MarkerGroup`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerItem {
    Connective(Connective),
    Tree(MarkerTree),
}

/// Flat, left-to-right sequence of sub-expressions joined by connectives.
///
/// Invariant: non-empty, starts and ends with a tree, trees and connectives
/// alternate. Only [`MarkerGroup::new`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MarkerItem>", into = "Vec<MarkerItem>")]
pub struct MarkerGroup {
    items: Vec<MarkerItem>,
}

impl MarkerGroup {
    pub fn new(items: Vec<MarkerItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(RpmReqsError::malformed("empty marker group"));
        }
        if items.len() % 2 == 0 {
            return Err(RpmReqsError::malformed(
                "marker group must start and end with an expression",
            ));
        }
        for (index, item) in items.iter().enumerate() {
            let expects_tree = index % 2 == 0;
            match (expects_tree, item) {
                (true, MarkerItem::Tree(_)) | (false, MarkerItem::Connective(_)) => {}
                (true, MarkerItem::Connective(c)) => {
                    return Err(RpmReqsError::malformed(format!(
                        "unexpected '{c}' at position {index}"
                    )));
                }
                (false, MarkerItem::Tree(_)) => {
                    return Err(RpmReqsError::malformed(format!(
                        "missing connective at position {index}"
                    )));
                }
            }
        }
        Ok(Self { items })
    }

    /// Build a group joining all `trees` with the same connective
    pub fn joined(connective: Connective, trees: Vec<MarkerTree>) -> Result<Self> {
        let mut items = Vec::with_capacity(trees.len() * 2);
        for (index, tree) in trees.into_iter().enumerate() {
            if index > 0 {
                items.push(MarkerItem::Connective(connective));
            }
            items.push(MarkerItem::Tree(tree));
        }
        Self::new(items)
    }

    pub fn items(&self) -> &[MarkerItem] {
        &self.items
    }
}

impl TryFrom<Vec<MarkerItem>> for MarkerGroup {
    type Error = RpmReqsError;

    fn try_from(items: Vec<MarkerItem>) -> Result<Self> {
        Self::new(items)
    }
}

impl From<MarkerGroup> for Vec<MarkerItem> {
    fn from(group: MarkerGroup) -> Self {
        group.items
    }
}

/// Boolean expression over environment comparisons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTree {
    Leaf(MarkerLeaf),
    Group(MarkerGroup),
    Const(bool),
}

impl MarkerTree {
    pub fn leaf(
        variable: impl Into<String>,
        operator: MarkerOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::Leaf(MarkerLeaf::new(variable, operator, value))
    }

    /// `a and b and ...`
    pub fn and(trees: Vec<MarkerTree>) -> Result<Self> {
        MarkerGroup::joined(Connective::And, trees).map(Self::Group)
    }

    /// `a or b or ...`
    pub fn or(trees: Vec<MarkerTree>) -> Result<Self> {
        MarkerGroup::joined(Connective::Or, trees).map(Self::Group)
    }

    /// Load a marker tree from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for MarkerTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => write!(f, "{leaf}"),
            Self::Const(value) => write!(f, "{value}"),
            Self::Group(group) => {
                write!(f, "(")?;
                for (index, item) in group.items().iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    match item {
                        MarkerItem::Connective(c) => write!(f, "{c}")?,
                        MarkerItem::Tree(tree) => write!(f, "{tree}")?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}
