//! Property-Based Tests for rpmreqs
//!
//! Uses proptest for testing invariants and edge cases
//!
//! These tests verify:
//! - Operator enum string round-trips (parse → to_string → parse)
//! - Constant folding invariants of the DNF reducer
//! - Specifier translation shape

use proptest::prelude::*;
use rpmreqs::{
    Environments, MarkerOperator, MarkerTree, RpmCondition, RpmTemplates, Specifier,
    SpecifierOperator, SpecifierSet, simplify_marker_to_rpm_condition, specifier_to_rpm_version,
};

// =============================================================================
// Operator Enum Property Tests
// =============================================================================

/// Strategy for generating valid MarkerOperator variants
fn marker_operator_strategy() -> impl Strategy<Value = MarkerOperator> {
    prop_oneof![
        Just(MarkerOperator::Equal),
        Just(MarkerOperator::ArbitraryEqual),
        Just(MarkerOperator::NotEqual),
        Just(MarkerOperator::Less),
        Just(MarkerOperator::LessEqual),
        Just(MarkerOperator::Greater),
        Just(MarkerOperator::GreaterEqual),
        Just(MarkerOperator::Compatible),
        Just(MarkerOperator::In),
        Just(MarkerOperator::NotIn),
    ]
}

/// Strategy for generating valid SpecifierOperator variants
fn specifier_operator_strategy() -> impl Strategy<Value = SpecifierOperator> {
    prop_oneof![
        Just(SpecifierOperator::Equal),
        Just(SpecifierOperator::ArbitraryEqual),
        Just(SpecifierOperator::NotEqual),
        Just(SpecifierOperator::Less),
        Just(SpecifierOperator::LessEqual),
        Just(SpecifierOperator::Greater),
        Just(SpecifierOperator::GreaterEqual),
        Just(SpecifierOperator::Compatible),
    ]
}

proptest! {
    /// MarkerOperator: to_string → parse round-trip is identity
    #[test]
    fn marker_operator_roundtrip(op in marker_operator_strategy()) {
        let s = op.to_string();
        let parsed: MarkerOperator = s.parse().expect("Should parse");
        prop_assert_eq!(op, parsed);
    }

    /// Specifier: to_string → parse round-trip is identity
    #[test]
    fn specifier_roundtrip(op in specifier_operator_strategy(), version in "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}") {
        let specifier = Specifier::new(op, version);
        let parsed: Specifier = specifier.to_string().parse().expect("Should parse");
        prop_assert_eq!(specifier, parsed);
    }
}

// =============================================================================
// Constant Folding Property Tests
// =============================================================================

/// Strategy for marker trees built only from constants
fn const_tree_strategy() -> impl Strategy<Value = MarkerTree> {
    let leaf = any::<bool>().prop_map(MarkerTree::Const);
    leaf.prop_recursive(3, 24, 4, |inner| {
        (prop::collection::vec(inner, 1..4), any::<bool>()).prop_map(|(children, use_or)| {
            let group = if use_or {
                MarkerTree::or(children)
            } else {
                MarkerTree::and(children)
            };
            group.expect("non-empty children")
        })
    })
}

/// Reference evaluation of a constant-only tree
fn reference_value(tree: &MarkerTree) -> bool {
    match tree {
        MarkerTree::Const(value) => *value,
        MarkerTree::Group(group) => {
            // OR of AND-runs, matching the flat group semantics
            let mut any_clause = false;
            let mut clause = true;
            for item in group.items() {
                match item {
                    rpmreqs::MarkerItem::Connective(rpmreqs::Connective::Or) => {
                        any_clause |= clause;
                        clause = true;
                    }
                    rpmreqs::MarkerItem::Connective(rpmreqs::Connective::And) => {}
                    rpmreqs::MarkerItem::Tree(sub) => clause &= reference_value(sub),
                }
            }
            any_clause | clause
        }
        MarkerTree::Leaf(_) => unreachable!("constant-only tree"),
    }
}

proptest! {
    /// Constant-only trees always fold to the boolean they denote
    #[test]
    fn constant_trees_fold_completely(tree in const_tree_strategy()) {
        let result = simplify_marker_to_rpm_condition(
            Some(&tree),
            &Environments::new(),
            &RpmTemplates::default(),
        )
        .expect("constants never fail");
        prop_assert_eq!(result, RpmCondition::Const(reference_value(&tree)));
    }

    /// A fully known environment never leaves a symbolic condition
    #[test]
    fn known_single_value_folds(minor in 0u32..20, bound in 0u32..20, op in marker_operator_strategy()) {
        prop_assume!(!matches!(op, MarkerOperator::Compatible));
        let tree = MarkerTree::leaf("python_version", op, format!("3.{bound}"));
        let environments = Environments::new().with("python_version", format!("3.{minor}").as_str());
        let result = simplify_marker_to_rpm_condition(Some(&tree), &environments, &RpmTemplates::default())
            .expect("known values fold");
        prop_assert!(matches!(result, RpmCondition::Const(_)));
    }
}

// =============================================================================
// Specifier Translation Property Tests
// =============================================================================

proptest! {
    /// Clause count: `~=` yields two clauses, everything else one
    #[test]
    fn specifier_clause_count(ops in prop::collection::vec(specifier_operator_strategy(), 1..6)) {
        let specifiers: SpecifierSet = ops.iter().map(|op| Specifier::new(*op, "1.0")).collect();
        let expected = ops
            .iter()
            .map(|op| if *op == SpecifierOperator::Compatible { 2 } else { 1 })
            .sum::<usize>();
        let rendered = specifier_to_rpm_version("pkg", &specifiers);
        prop_assert_eq!(rendered.split(", ").count(), expected);
    }

    /// Every clause names the package
    #[test]
    fn specifier_clauses_name_package(name in "[a-z][a-z0-9-]{0,12}", op in specifier_operator_strategy()) {
        let specifiers: SpecifierSet = std::iter::once(Specifier::new(op, "2.1")).collect();
        let rendered = specifier_to_rpm_version(&name, &specifiers);
        for clause in rendered.split(", ") {
            prop_assert!(clause.contains(&name));
        }
    }

    /// Empty set is the bare package name
    #[test]
    fn empty_specifier_set_is_bare_name(name in "[a-zA-Z0-9_.-]{1,20}") {
        prop_assert_eq!(specifier_to_rpm_version(&name, &SpecifierSet::new()), name);
    }
}
