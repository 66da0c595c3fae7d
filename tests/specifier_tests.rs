//! Tests for Specifier Translation
//!
//! These tests verify:
//! - Direct operator mapping and clause order
//! - Compatible-release expansion
//! - Wildcard stripping
//! - Package naming through the python_package template

use rpmreqs::{
    MarkerOperator, MarkerTree, RpmTemplates, Specifier, SpecifierOperator, SpecifierSet,
    Environments, requirement_to_rpm, simplify_marker_to_rpm_condition, specifier_to_rpm_version,
};

fn set(clauses: &[&str]) -> SpecifierSet {
    SpecifierSet::parse_clauses(clauses).unwrap()
}

#[test]
fn test_range_in_input_order() {
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&[">=1.0", "<2.0"])),
        "foo >= 1.0, foo < 2.0"
    );
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&["<2.0", ">=1.0"])),
        "foo < 2.0, foo >= 1.0"
    );
}

#[test]
fn test_compatible_release_expands_to_two_clauses() {
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&["~=1.4"])),
        "foo >= 1.4, foo < 1.4^zzz"
    );
}

#[test]
fn test_empty_set_is_unconstrained() {
    assert_eq!(specifier_to_rpm_version("foo", &SpecifierSet::new()), "foo");
}

#[test]
fn test_every_direct_operator() {
    let cases = [
        (SpecifierOperator::Equal, "foo = 1"),
        (SpecifierOperator::ArbitraryEqual, "foo = 1"),
        (SpecifierOperator::Less, "foo < 1"),
        (SpecifierOperator::LessEqual, "foo <= 1"),
        (SpecifierOperator::GreaterEqual, "foo >= 1"),
        (SpecifierOperator::Greater, "foo > 1"),
    ];
    for (operator, expected) in cases {
        let specifiers: SpecifierSet = [Specifier::new(operator, "1")].into_iter().collect();
        assert_eq!(specifier_to_rpm_version("foo", &specifiers), expected, "{operator}");
    }
}

#[test]
fn test_exclusion_and_wildcards() {
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&["!=1.5.*", ">=1.0"])),
        "(foo < 1.5 or foo > 1.5), foo >= 1.0"
    );
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&["==2.*"])),
        "foo = 2"
    );
}

#[test]
fn test_compatible_suffix_differs_from_marker_suffix() {
    let templates = RpmTemplates::new("foo", "{arch}", "{name}", None).unwrap();
    let marker = MarkerTree::leaf("python_version", MarkerOperator::Compatible, "1.4");
    let condition =
        simplify_marker_to_rpm_condition(Some(&marker), &Environments::new(), &templates).unwrap();

    assert_eq!(condition.to_string(), "(foo >= 1.4 and foo < 1.4^next)");
    assert_eq!(
        specifier_to_rpm_version("foo", &set(&["~=1.4"])),
        "foo >= 1.4, foo < 1.4^zzz"
    );
}

#[test]
fn test_python_package_template() {
    let templates = RpmTemplates::default();
    assert_eq!(
        requirement_to_rpm("setuptools", &set(&[">=40.8.0"]), &templates),
        "python%{python3_version}dist(setuptools) >= 40.8.0"
    );

    let templates = RpmTemplates::new("python(abi)", "{arch}", "python-{name}", None).unwrap();
    assert_eq!(
        requirement_to_rpm("setuptools", &set(&[">=40.8.0"]), &templates),
        "python-setuptools >= 40.8.0"
    );
    assert_eq!(
        requirement_to_rpm("wheel", &SpecifierSet::new(), &templates),
        "python-wheel"
    );
}

#[test]
fn test_specifier_set_from_json() {
    let specifiers: SpecifierSet = serde_json::from_str(
        r#"[{"operator": ">=", "version": "1.0"}, {"operator": "~=", "version": "1.2"}]"#,
    )
    .unwrap();
    assert_eq!(
        specifier_to_rpm_version("bar", &specifiers),
        "bar >= 1.0, bar >= 1.2, bar < 1.2^zzz"
    );
}
