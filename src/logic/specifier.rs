//! Specifier translation: PEP 440 specifier sets as RPM version requirements.

use crate::specifier::{Specifier, SpecifierSet};
use crate::template::RpmTemplates;
use crate::types::SpecifierOperator;

/// Suffix bounding a `~=` requirement.
///
/// RPM sorts `^` after the bare prefix and `zzz` after any alphabetic
/// suffix, so `<v>^zzz` stays above every release sharing the prefix.
pub const SPECIFIER_COMPATIBLE_SUFFIX: &str = "^zzz";

/// Render the RPM requirement on `package` for `specifiers`.
///
/// Clauses are joined with `", "` in set order. An empty set yields the bare
/// package name.
pub fn specifier_to_rpm_version(package: &str, specifiers: &SpecifierSet) -> String {
    let clauses: Vec<String> = specifiers
        .iter()
        .flat_map(|specifier| specifier_clauses(package, specifier))
        .collect();

    if clauses.is_empty() {
        package.to_string()
    } else {
        clauses.join(", ")
    }
}

/// Render a requirement on Python distribution `name`, named through the
/// `python_package` template
pub fn requirement_to_rpm(name: &str, specifiers: &SpecifierSet, templates: &RpmTemplates) -> String {
    specifier_to_rpm_version(&templates.package_name(name), specifiers)
}

fn specifier_clauses(package: &str, specifier: &Specifier) -> Vec<String> {
    let version = strip_wildcard(&specifier.version);

    if let Some(rpm_op) = specifier.operator.rpm_operator() {
        return vec![format!("{package} {rpm_op} {version}")];
    }

    match specifier.operator {
        SpecifierOperator::Compatible => vec![
            format!("{package} >= {version}"),
            format!("{package} < {version}{SPECIFIER_COMPATIBLE_SUFFIX}"),
        ],
        SpecifierOperator::NotEqual => {
            vec![format!("({package} < {version} or {package} > {version})")]
        }
        // Direct operators returned above
        _ => Vec::new(),
    }
}

/// Drop a trailing wildcard: every trailing `.` and `*`
fn strip_wildcard(version: &str) -> &str {
    version.trim_end_matches(['.', '*'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(clauses: &[&str]) -> SpecifierSet {
        SpecifierSet::parse_clauses(clauses).unwrap()
    }

    #[test]
    fn test_range() {
        assert_eq!(
            specifier_to_rpm_version("foo", &set(&[">=1.0", "<2.0"])),
            "foo >= 1.0, foo < 2.0"
        );
    }

    #[test]
    fn test_compatible_uses_zzz_suffix() {
        assert_eq!(
            specifier_to_rpm_version("foo", &set(&["~=1.4"])),
            "foo >= 1.4, foo < 1.4^zzz"
        );
    }

    #[test]
    fn test_empty_set_is_bare_name() {
        assert_eq!(specifier_to_rpm_version("foo", &SpecifierSet::new()), "foo");
    }

    #[test]
    fn test_wildcard_stripped() {
        assert_eq!(specifier_to_rpm_version("foo", &set(&["==1.2.*"])), "foo = 1.2");
        assert_eq!(
            specifier_to_rpm_version("foo", &set(&["!=3.*"])),
            "(foo < 3 or foo > 3)"
        );
    }

    #[test]
    fn test_arbitrary_equality() {
        assert_eq!(specifier_to_rpm_version("foo", &set(&["===1.0"])), "foo = 1.0");
    }

    #[test]
    fn test_requirement_uses_package_template() {
        let templates = RpmTemplates::default();
        assert_eq!(
            requirement_to_rpm("setuptools", &set(&[">=40.8.0"]), &templates),
            "python%{python3_version}dist(setuptools) >= 40.8.0"
        );
        assert_eq!(
            requirement_to_rpm("wheel", &SpecifierSet::new(), &templates),
            "python%{python3_version}dist(wheel)"
        );
    }
}
