//! Greedy priority-ordered incremental selection (Dale & Reiter).
//!
//! Walks the referent type's priority list once, keeping each referent fact
//! that rules out at least one pending confusor. Greedy and non-backtracking:
//! a kept fact is never undone, so the priority order is the sole correctness
//! lever.
//!
//! Reference: Dale & Reiter, "Computational interpretations of the Gricean
//! maxims in the generation of referring expressions" (Cognitive Science,
//! 1995).

use std::collections::HashSet;

use oxigraph::model::NamedNode;

use crate::error::SelectError;
use crate::expression::ReferringExpression;
use crate::priorities::PriorityConfig;
use crate::store::{FactStore, Statement, local_name};

use super::{Selector, confusor_statements, referent_priorities, warn_unknown_predicates};

/// Greedy single-pass selector.
pub struct IncrementalSelector {
    config: PriorityConfig,
}

impl IncrementalSelector {
    /// Create a selector over the given priority configuration.
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }
}

impl Selector for IncrementalSelector {
    fn resolve(
        &self,
        referent: &NamedNode,
        confusors: &[NamedNode],
        store: &dyn FactStore,
    ) -> Result<ReferringExpression, SelectError> {
        let typed = referent_priorities(&self.config, referent, store)?;

        let referent_stmts = store.about(referent)?;
        let confusor_stmts = confusor_statements(confusors, store)?;

        // The fact universe: everything known about the referent and every
        // confusor. Substituted facts are checked against this, not the
        // store, so a resolution touches the store a bounded number of times.
        let mut world: Vec<Statement> = referent_stmts.clone();
        for stmts in &confusor_stmts {
            world.extend(stmts.iter().cloned());
        }
        warn_unknown_predicates(&typed, referent, world.iter());
        let world_set: HashSet<&Statement> = world.iter().collect();

        let mut expression = ReferringExpression::new(referent.clone());
        let mut selected: HashSet<&Statement> = HashSet::new();
        let mut pending: Vec<NamedNode> = confusors.to_vec();

        'priorities: for predicate in typed.priorities {
            for stmt in &referent_stmts {
                if pending.is_empty() {
                    break 'priorities;
                }
                if selected.contains(stmt) || local_name(&stmt.predicate) != predicate.as_str() {
                    continue;
                }
                let removed = rules_out(&pending, stmt, &world, &world_set);
                if removed.is_empty() {
                    continue;
                }
                tracing::debug!(fact = %stmt, ruled_out = removed.len(), "keeping fact");
                selected.insert(stmt);
                expression.add_positive(stmt);
                pending.retain(|confusor| !removed.contains(confusor));
            }
        }

        if !pending.is_empty() {
            return Err(SelectError::RemainingConfusorsUnresolved {
                remaining: pending.iter().map(|c| c.as_str().to_string()).collect(),
            });
        }

        Ok(expression)
    }
}

/// Which of the pending confusors would this fact rule out?
///
/// A confusor is ruled out when substituting it for the fact's subject does
/// not already hold in the universe *and* the confusor has some other
/// subject-position fact with the same predicate — i.e. both entities carry
/// the predicate but with different values.
fn rules_out(
    pending: &[NamedNode],
    stmt: &Statement,
    world: &[Statement],
    world_set: &HashSet<&Statement>,
) -> HashSet<NamedNode> {
    let mut ruled_out = HashSet::new();
    for confusor in pending {
        if ruled_out.contains(confusor) {
            continue;
        }
        let substituted = Statement::new(
            confusor.clone(),
            stmt.predicate.clone(),
            stmt.object.clone(),
        );
        if world_set.contains(&substituted) {
            // The fact holds for the confusor too; it distinguishes nothing.
            continue;
        }
        if world
            .iter()
            .any(|w| w.subject == *confusor && w.predicate == stmt.predicate)
        {
            tracing::debug!(fact = %stmt, confusor = confusor.as_str(), "rules out");
            ruled_out.insert(confusor.clone());
        }
    }
    ruled_out
}
