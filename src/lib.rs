//! rpmreqs Library
//!
//! Translates Python packaging constraints into RPM spec-file syntax:
//! PEP 508 environment markers become RPM conditions (or fold to `true` /
//! `false` against the known build environments), and PEP 440 specifier sets
//! become RPM version requirements.
//!
//! ```
//! use rpmreqs::{
//!     Environments, MarkerOperator, MarkerTree, RpmCondition, RpmTemplates, SpecifierSet,
//!     simplify_marker_to_rpm_condition, specifier_to_rpm_version,
//! };
//!
//! let marker = MarkerTree::leaf("python_version", MarkerOperator::Equal, "3.9");
//! let environments = Environments::new().with("python_version", "3.9");
//! let condition =
//!     simplify_marker_to_rpm_condition(Some(&marker), &environments, &RpmTemplates::default())
//!         .unwrap();
//! assert_eq!(condition, RpmCondition::TRUE);
//!
//! let specifiers = SpecifierSet::parse_clauses([">=1.0", "<2.0"]).unwrap();
//! assert_eq!(specifier_to_rpm_version("foo", &specifiers), "foo >= 1.0, foo < 2.0");
//! ```

pub mod cli;
pub mod condition;
pub mod config_file;
pub mod environment;
pub mod error;
pub mod logic;
pub mod marker;
pub mod specifier;
pub mod template;
pub mod types;

// Re-export main types for convenience
pub use condition::RpmCondition;
pub use config_file::{GeneratorConfig, ResolvedConfig, TemplateSettings};
pub use environment::{EnvValue, Environments};
pub use error::{Result, RpmReqsError};
pub use marker::{MarkerGroup, MarkerItem, MarkerLeaf, MarkerTree};
pub use specifier::{Specifier, SpecifierSet};
pub use template::{InterpreterVersion, Placeholder, RpmTemplates, Template};
pub use types::{Connective, MarkerOperator, MarkerVariable, SpecifierOperator};

// Translation passes
pub use logic::evaluator::simplify_marker_to_rpm_condition;
pub use logic::leaf::leaf_to_rpm_condition;
pub use logic::specifier::{requirement_to_rpm, specifier_to_rpm_version};
