//! Minimum-cardinality selection by bounded set-constraint search (Gardent).
//!
//! Models the referent as its set of (predicate, object) pairs `P+` and each
//! confusor `i` as its own pair set `Pi+`; candidate negative pairs `P-` are
//! pairs true of some confusor but not of the referent. A description is a
//! pair of disjoint selections `Sel+ ⊆ P+` and `Sel- ⊆ P-` such that every
//! confusor differs from the referent in *exactly one* selected pair:
//! `|(Sel+ \ Pi+) ∪ (Sel- ∩ Pi+)| == 1`. The smallest such selection wins,
//! found by trying target sizes 1, 2, … up to a configurable bound.
//!
//! The exact-one condition is deliberately stricter than "at least one": a
//! selection that distinguishes some confusor twice is infeasible at that
//! size and the search moves on.
//!
//! Reference: Gardent, "Generating minimal definite descriptions" (ACL 2002).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use oxigraph::model::{NamedNode, Term};

use crate::error::SelectError;
use crate::expression::ReferringExpression;
use crate::priorities::PriorityConfig;
use crate::store::{FactStore, Statement, local_name, term_value};

use super::{Selector, confusor_statements, referent_priorities, warn_unknown_predicates};

/// Default ceiling on description size.
pub const DEFAULT_MAX_CARDINALITY: usize = 10;

/// A (predicate, object) pair: one attribute of an entity.
type Pair = (NamedNode, Term);

/// Minimum-cardinality selector.
pub struct ConstraintSelector {
    config: PriorityConfig,
    max_cardinality: usize,
}

impl ConstraintSelector {
    /// Create a selector over the given priority configuration.
    pub fn new(config: PriorityConfig) -> Self {
        Self {
            config,
            max_cardinality: DEFAULT_MAX_CARDINALITY,
        }
    }

    /// Override the description-size ceiling.
    pub fn with_max_cardinality(mut self, max_cardinality: usize) -> Self {
        self.max_cardinality = max_cardinality;
        self
    }
}

impl Selector for ConstraintSelector {
    fn resolve(
        &self,
        referent: &NamedNode,
        confusors: &[NamedNode],
        store: &dyn FactStore,
    ) -> Result<ReferringExpression, SelectError> {
        let typed = referent_priorities(&self.config, referent, store)?;

        let referent_stmts = store.about(referent)?;
        let confusor_stmts = confusor_statements(confusors, store)?;
        warn_unknown_predicates(&typed, referent, confusor_stmts.iter().flatten());

        let p_plus: HashSet<Pair> = referent_stmts.iter().map(pair_of).collect();
        let confusor_pairs: Vec<HashSet<Pair>> = confusor_stmts
            .iter()
            .map(|stmts| stmts.iter().map(pair_of).collect())
            .collect();

        let mut all_pairs: HashSet<Pair> = p_plus.clone();
        for pairs in &confusor_pairs {
            all_pairs.extend(pairs.iter().cloned());
        }

        // A fixed, deterministic enumeration of the pair universe: priority
        // rank first, then lexical tie-breaks. The subset search visits
        // combinations in this order, so the tie-break among equal-size
        // solutions is the enumeration order itself.
        let rank = rank_map(typed.priorities);
        let mut universe: Vec<Pair> = all_pairs.into_iter().collect();
        universe.sort_by(|a, b| pair_order(&rank, a, b));

        let positive: Vec<bool> = universe.iter().map(|p| p_plus.contains(p)).collect();
        let distinguishes: Vec<Vec<usize>> = universe
            .iter()
            .enumerate()
            .map(|(j, pair)| {
                confusor_pairs
                    .iter()
                    .enumerate()
                    .filter_map(|(i, pairs)| {
                        let hits = if positive[j] {
                            !pairs.contains(pair)
                        } else {
                            pairs.contains(pair)
                        };
                        hits.then_some(i)
                    })
                    .collect()
            })
            .collect();

        for target in 1..=self.max_cardinality {
            let mut counts = vec![0u32; confusors.len()];
            let mut chosen = Vec::with_capacity(target);
            if search(0, target, &distinguishes, &mut counts, &mut chosen) {
                tracing::debug!(cardinality = target, "minimal selection found");
                let mut expression = ReferringExpression::new(referent.clone());
                for &j in chosen.iter().filter(|&&j| positive[j]) {
                    let (predicate, object) = universe[j].clone();
                    expression.add_positive_value(predicate, object);
                }
                for &j in chosen.iter().filter(|&&j| !positive[j]) {
                    let (predicate, object) = universe[j].clone();
                    expression.add_negative_value(predicate, object);
                }
                return Ok(expression);
            }
        }

        Err(SelectError::NoSolutionFound {
            max_cardinality: self.max_cardinality,
        })
    }
}

fn pair_of(stmt: &Statement) -> Pair {
    (stmt.predicate.clone(), stmt.object.clone())
}

/// Priority rank per predicate local name; first occurrence wins.
fn rank_map(priorities: &[String]) -> HashMap<&str, usize> {
    let mut map = HashMap::new();
    for (i, name) in priorities.iter().enumerate() {
        map.entry(name.as_str()).or_insert(i);
    }
    map
}

/// Ranked predicates come first, in rank order; unranked predicates follow
/// lexically; values break remaining ties.
fn pair_order(rank: &HashMap<&str, usize>, a: &Pair, b: &Pair) -> Ordering {
    let ra = rank.get(local_name(&a.0));
    let rb = rank.get(local_name(&b.0));
    match (ra, rb) {
        (Some(x), Some(y)) if x != y => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => local_name(&a.0)
            .cmp(local_name(&b.0))
            .then_with(|| a.0.as_str().cmp(b.0.as_str()))
            .then_with(|| term_value(&a.1).cmp(term_value(&b.1)))
            .then_with(|| a.1.to_string().cmp(&b.1.to_string())),
    }
}

/// Depth-first search for `remaining` more pairs from `universe[start..]`
/// leaving every confusor distinguished exactly once.
///
/// `counts` tracks how many chosen pairs distinguish each confusor; a pair
/// that would push any confusor past one is pruned immediately, since counts
/// never decrease along a branch.
fn search(
    start: usize,
    remaining: usize,
    distinguishes: &[Vec<usize>],
    counts: &mut [u32],
    chosen: &mut Vec<usize>,
) -> bool {
    if remaining == 0 {
        return counts.iter().all(|&c| c == 1);
    }
    if distinguishes.len().saturating_sub(start) < remaining {
        return false;
    }
    for j in start..distinguishes.len() {
        if distinguishes[j].iter().any(|&i| counts[i] >= 1) {
            continue;
        }
        for &i in &distinguishes[j] {
            counts[i] += 1;
        }
        chosen.push(j);
        if search(j + 1, remaining - 1, distinguishes, counts, chosen) {
            return true;
        }
        chosen.pop();
        for &i in &distinguishes[j] {
            counts[i] -= 1;
        }
    }
    false
}
