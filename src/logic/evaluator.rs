//! Marker simplification against the known build environments.
//!
//! Clauses fully determined by the environments fold to `true` / `false`.
//! Everything else is rendered through the leaf translator, and groups are
//! reduced to disjunctive normal form:
//!
//! 1. split the group on `or` into clauses
//! 2. inside a clause drop `true` terms, discard the clause on any `false`
//! 3. no clause left is `false`, an emptied clause is `true`
//! 4. otherwise render `a and b` for one clause, `(a and b or c)` for several
//!
//! Clause order follows the source. Absorbed or duplicate clauses are kept:
//! only `true` / `false` folding is performed.

use tracing::debug;

use crate::condition::RpmCondition;
use crate::environment::Environments;
use crate::error::Result;
use crate::logic::compare::evaluate_leaf;
use crate::logic::leaf::leaf_to_rpm_condition;
use crate::marker::{MarkerItem, MarkerLeaf, MarkerTree};
use crate::template::RpmTemplates;
use crate::types::{Connective, is_extras_variable};

/// Simplify `marker` against `environments`, rendering what remains.
///
/// `None` stands for "no marker" and is always `true`.
///
/// # Errors
///
/// Unsupported variables or operators in clauses that cannot be folded, and
/// comparisons that cannot be evaluated against a known value.
pub fn simplify_marker_to_rpm_condition(
    marker: Option<&MarkerTree>,
    environments: &Environments,
    templates: &RpmTemplates,
) -> Result<RpmCondition> {
    match marker {
        None => Ok(RpmCondition::TRUE),
        Some(tree) => simplify_tree(tree, environments, templates),
    }
}

/// Group element after evaluation
enum Term {
    Connective(Connective),
    Condition(RpmCondition),
}

fn simplify_tree(
    tree: &MarkerTree,
    environments: &Environments,
    templates: &RpmTemplates,
) -> Result<RpmCondition> {
    match tree {
        MarkerTree::Const(value) => Ok(RpmCondition::Const(*value)),
        MarkerTree::Leaf(leaf) => simplify_leaf(leaf, environments, templates),
        MarkerTree::Group(group) => {
            let terms = group
                .items()
                .iter()
                .map(|item| match item {
                    MarkerItem::Connective(c) => Ok(Term::Connective(*c)),
                    MarkerItem::Tree(sub) => {
                        simplify_tree(sub, environments, templates).map(Term::Condition)
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(reduce_to_dnf(terms))
        }
    }
}

fn simplify_leaf(
    leaf: &MarkerLeaf,
    environments: &Environments,
    templates: &RpmTemplates,
) -> Result<RpmCondition> {
    let Some(known) = environments.lookup(&leaf.variable) else {
        return leaf_to_rpm_condition(leaf, templates).map(RpmCondition::Expr);
    };

    let evaluations = known
        .candidates()
        .iter()
        .map(|candidate| evaluate_leaf(leaf, candidate))
        .collect::<Result<Vec<bool>>>()?;

    if evaluations.iter().all(|&holds| holds) {
        debug!(marker = %leaf, "marker holds in every environment");
        Ok(RpmCondition::TRUE)
    } else if evaluations.iter().all(|&holds| !holds) {
        debug!(marker = %leaf, "marker holds in no environment");
        Ok(RpmCondition::FALSE)
    } else if is_extras_variable(&leaf.variable) {
        // At least one build variant carries the extra
        debug!(marker = %leaf, "extra requested by some builds, keeping requirement");
        Ok(RpmCondition::TRUE)
    } else {
        leaf_to_rpm_condition(leaf, templates).map(RpmCondition::Expr)
    }
}

/// AND-clause being collected between two `or`s
#[derive(Default)]
struct Clause {
    terms: Vec<String>,
    falsified: bool,
}

impl Clause {
    fn render(&self) -> String {
        self.terms.join(" and ")
    }
}

fn reduce_to_dnf(terms: Vec<Term>) -> RpmCondition {
    let mut clauses = Vec::new();
    let mut current = Clause::default();

    for term in terms {
        match term {
            Term::Connective(Connective::Or) => clauses.push(std::mem::take(&mut current)),
            Term::Connective(Connective::And) | Term::Condition(RpmCondition::Const(true)) => {}
            Term::Condition(RpmCondition::Const(false)) => current.falsified = true,
            Term::Condition(RpmCondition::Expr(expr)) => current.terms.push(expr),
        }
    }
    clauses.push(current);
    clauses.retain(|clause| !clause.falsified);

    match clauses.as_slice() {
        [] => RpmCondition::FALSE,
        _ if clauses.iter().any(|clause| clause.terms.is_empty()) => RpmCondition::TRUE,
        [single] => RpmCondition::Expr(single.render()),
        _ => {
            let rendered: Vec<String> = clauses.iter().map(Clause::render).collect();
            RpmCondition::Expr(format!("({})", rendered.join(" or ")))
        }
    }
}
