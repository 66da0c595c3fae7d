//! Concrete evaluation of one marker comparison against one known value.
//!
//! Follows PEP 508 evaluation:
//!
//! - `in` / `not in` test whether the environment value occurs in the
//!   marker value
//! - `extra` names are normalized before a plain string comparison
//! - when both sides are valid PEP 440, the comparison uses version semantics
//! - otherwise only `==`, `!=` and `===` are defined, as string equality.
//!   Ordering is undefined there: `"6.5.0-arch1-1" >= "10"` is an error, not
//!   a lexicographic guess.

use pep440_rs::{Version, VersionSpecifier};
use std::str::FromStr;
use tracing::trace;

use crate::error::{Result, RpmReqsError};
use crate::marker::MarkerLeaf;
use crate::types::{MarkerOperator, is_extras_variable};

/// Evaluate `leaf` with its variable bound to `candidate`
pub fn evaluate_leaf(leaf: &MarkerLeaf, candidate: &str) -> Result<bool> {
    let result = match leaf.operator {
        MarkerOperator::In => leaf.value.contains(candidate),
        MarkerOperator::NotIn => !leaf.value.contains(candidate),
        _ if is_extras_variable(&leaf.variable) => compare_strings(
            leaf,
            &normalize_extra(candidate),
            &normalize_extra(&leaf.value),
        )?,
        MarkerOperator::ArbitraryEqual => candidate == leaf.value,
        op => match compare_versions(op, candidate, &leaf.value) {
            Some(result) => result,
            None => compare_strings(leaf, candidate, &leaf.value)?,
        },
    };
    trace!(marker = %leaf, candidate, result, "evaluated marker clause");
    Ok(result)
}

/// Version comparison, or `None` when either side is not valid PEP 440
fn compare_versions(operator: MarkerOperator, candidate: &str, value: &str) -> Option<bool> {
    let version = Version::from_str(candidate).ok()?;
    let specifier = VersionSpecifier::from_str(&format!("{operator}{value}")).ok()?;
    Some(specifier.contains(&version))
}

fn compare_strings(leaf: &MarkerLeaf, lhs: &str, rhs: &str) -> Result<bool> {
    Ok(match leaf.operator {
        MarkerOperator::Equal | MarkerOperator::ArbitraryEqual => lhs == rhs,
        MarkerOperator::NotEqual => lhs != rhs,
        MarkerOperator::In => rhs.contains(lhs),
        MarkerOperator::NotIn => !rhs.contains(lhs),
        MarkerOperator::Less
        | MarkerOperator::LessEqual
        | MarkerOperator::Greater
        | MarkerOperator::GreaterEqual
        | MarkerOperator::Compatible => {
            return Err(RpmReqsError::UndefinedComparison {
                variable: leaf.variable.clone(),
                operator: leaf.operator.to_string(),
                value: leaf.value.clone(),
            });
        }
    })
}

/// Normalize an extra name: lowercase, runs of `-`, `_`, `.` become `-`
pub fn normalize_extra(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    out
}
