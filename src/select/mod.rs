//! Description selection strategies.
//!
//! Three interchangeable selectors implement the same contract — referent,
//! confusors, and a fact store in; a distinguishing [`ReferringExpression`]
//! out — with fundamentally different algorithms:
//!
//! - [`IncrementalSelector`](incremental::IncrementalSelector): greedy,
//!   priority-ordered, single pass (Dale & Reiter)
//! - [`ConstraintSelector`](constraint::ConstraintSelector): minimum
//!   cardinality by bounded set-constraint search (Gardent)
//! - [`GraphSelector`](graph::GraphSelector): branch-and-bound subgraph
//!   search with structural matching and a wall-clock budget (Krahmer et al.)
//!
//! Selectors are synchronous, single-threaded, and hold no mutable state
//! beyond the [`PriorityConfig`] they were constructed with; concurrent
//! resolutions over distinct stores need no coordination.

pub mod constraint;
pub mod graph;
pub mod incremental;

use std::collections::{BTreeSet, HashSet};

use oxigraph::model::NamedNode;

use crate::error::SelectError;
use crate::expression::ReferringExpression;
use crate::priorities::PriorityConfig;
use crate::store::{FactStore, Statement, local_name};

/// A description-selection strategy.
pub trait Selector {
    /// Compute a description that holds for the referent and fails for every
    /// confusor.
    fn resolve(
        &self,
        referent: &NamedNode,
        confusors: &[NamedNode],
        store: &dyn FactStore,
    ) -> Result<ReferringExpression, SelectError>;
}

/// The priority list and ignore-list matched to a referent's type.
pub(crate) struct TypedPriorities<'a> {
    /// The first referent type that had a priorities entry.
    pub type_iri: String,
    /// Ordered predicate names for that type.
    pub priorities: &'a [String],
    /// Predicate names exempt from coverage warnings.
    pub ignored: HashSet<&'a str>,
}

/// Scan the referent's types in store order and take the first one with a
/// priorities entry, merging that type's ignore-list.
///
/// Types seen before the match are only kept for the error message.
pub(crate) fn referent_priorities<'a>(
    config: &'a PriorityConfig,
    referent: &NamedNode,
    store: &dyn FactStore,
) -> Result<TypedPriorities<'a>, SelectError> {
    let types = store.types_of(referent)?;
    if types.is_empty() {
        return Err(SelectError::UnknownReferentType {
            referent: referent.as_str().to_string(),
        });
    }

    let mut seen = Vec::new();
    for ty in &types {
        let type_iri = ty.as_str();
        seen.push(type_iri.to_string());
        if let Some(priorities) = config.priorities_for(type_iri) {
            let ignored = config
                .ignored_for(type_iri)
                .iter()
                .map(String::as_str)
                .collect();
            tracing::debug!(
                type_iri,
                referent = referent.as_str(),
                "using priorities {priorities:?}"
            );
            return Ok(TypedPriorities {
                type_iri: type_iri.to_string(),
                priorities,
                ignored,
            });
        }
    }

    Err(SelectError::NoPrioritiesForType {
        referent: referent.as_str().to_string(),
        types: seen.join(" "),
    })
}

/// Gather each confusor's statements (as subject or object), aborting on the
/// first confusor with no facts at all.
pub(crate) fn confusor_statements(
    confusors: &[NamedNode],
    store: &dyn FactStore,
) -> Result<Vec<Vec<Statement>>, SelectError> {
    let mut result = Vec::with_capacity(confusors.len());
    for confusor in confusors {
        let stmts = store.about(confusor)?;
        if stmts.is_empty() {
            return Err(SelectError::NoInformationForConfusor {
                confusor: confusor.as_str().to_string(),
            });
        }
        result.push(stmts);
    }
    Ok(result)
}

/// Log predicates that appear on entities but are known to neither the
/// priority list nor the ignore-list. Coverage gaps, not errors: the
/// selectors proceed using only known predicates.
pub(crate) fn warn_unknown_predicates<'a>(
    typed: &TypedPriorities<'_>,
    referent: &NamedNode,
    statements: impl Iterator<Item = &'a Statement>,
) {
    let mut unknown: BTreeSet<&str> = statements
        .map(|stmt| local_name(&stmt.predicate))
        .collect();
    for known in typed.priorities {
        unknown.remove(known.as_str());
    }
    for known in &typed.ignored {
        unknown.remove(known);
    }
    if !unknown.is_empty() {
        tracing::warn!(
            type_iri = %typed.type_iri,
            referent = referent.as_str(),
            "missing properties: {unknown:?}"
        );
    }
}
