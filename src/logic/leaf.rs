//! Leaf translation: one marker comparison rendered in RPM syntax.
//!
//! # Rendering Rules
//!
//! | Variable | Operator | Output |
//! |----------|----------|--------|
//! | `platform_machine` | `==` | `if <arch>` |
//! | `platform_machine` | `!=` | `without <arch>` |
//! | `platform_machine` | `in` | `if (<arch> or <arch> ...)` |
//! | interpreter / kernel | `==` `===` `<` `<=` `>=` `>` | `<pkg> <rpm-op> <v>` |
//! | interpreter / kernel | `~=` | `(<pkg> >= <v> and <pkg> < <v>^next)` |
//! | interpreter / kernel | `!=` | `(<pkg> < <v> or <pkg> > <v>)` |
//! | interpreter / kernel | `in` | `(<pkg> = <v> or <pkg> = <v> ...)` |
//!
//! Interpreter variables (`python_full_version`, `python_version`,
//! `implementation_version`) use the ABI token as `<pkg>`; `platform_release`
//! uses `kernel`. Anything else is an error.

use std::str::FromStr;

use crate::error::{Result, RpmReqsError};
use crate::marker::MarkerLeaf;
use crate::template::RpmTemplates;
use crate::types::{MarkerOperator, MarkerVariable, VariableCategory};

/// Suffix bounding a `~=` range: sorts after every release with the prefix
pub const MARKER_COMPATIBLE_SUFFIX: &str = "^next";

const KERNEL_PACKAGE: &str = "kernel";

/// Render one comparison as an RPM condition
pub fn leaf_to_rpm_condition(leaf: &MarkerLeaf, templates: &RpmTemplates) -> Result<String> {
    let variable = MarkerVariable::from_str(&leaf.variable)
        .map_err(|_| RpmReqsError::unsupported_variable(&leaf.variable))?;

    match variable.category() {
        VariableCategory::Architecture => architecture_condition(leaf, templates),
        VariableCategory::Interpreter => versioned_condition(leaf, templates.abi_token()),
        VariableCategory::KernelRelease => versioned_condition(leaf, KERNEL_PACKAGE),
    }
}

fn architecture_condition(leaf: &MarkerLeaf, templates: &RpmTemplates) -> Result<String> {
    match leaf.operator {
        MarkerOperator::Equal => Ok(format!("if {}", templates.arch_token(&leaf.value))),
        MarkerOperator::NotEqual => Ok(format!("without {}", templates.arch_token(&leaf.value))),
        MarkerOperator::In => {
            let arches: Vec<String> = leaf
                .value
                .split_whitespace()
                .map(|arch| templates.arch_token(arch))
                .collect();
            Ok(format!("if ({})", arches.join(" or ")))
        }
        op => Err(RpmReqsError::unsupported_operator(&leaf.variable, op)),
    }
}

fn versioned_condition(leaf: &MarkerLeaf, package: &str) -> Result<String> {
    let version = &leaf.value;

    if let Some(rpm_op) = leaf.operator.rpm_operator() {
        return Ok(format!("{package} {rpm_op} {version}"));
    }

    match leaf.operator {
        MarkerOperator::Compatible => Ok(format!(
            "({package} >= {version} and {package} < {version}{MARKER_COMPATIBLE_SUFFIX})"
        )),
        MarkerOperator::NotEqual => Ok(format!(
            "({package} < {version} or {package} > {version})"
        )),
        MarkerOperator::In => {
            let clauses: Vec<String> = version
                .split_whitespace()
                .map(|each| format!("{package} = {each}"))
                .collect();
            Ok(format!("({})", clauses.join(" or ")))
        }
        op => Err(RpmReqsError::unsupported_operator(&leaf.variable, op)),
    }
}
