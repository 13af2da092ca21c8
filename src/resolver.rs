//! Resolution filter: which candidates does a description pick out?
//!
//! The inverse of selection, used to verify that a description denotes
//! exactly the referent it was built for. Predicates are evaluated in order
//! with AND semantics, short-circuiting once no candidate survives.

use oxigraph::model::NamedNode;

use crate::expression::ReferringExpression;
use crate::store::{FactStore, StoreResult};

/// The subset of `candidates` for which every predicate of the expression
/// holds, in the original candidate order.
pub fn resolve(
    expression: &ReferringExpression,
    candidates: &[NamedNode],
    store: &dyn FactStore,
) -> StoreResult<Vec<NamedNode>> {
    let mut result: Vec<NamedNode> = candidates.to_vec();
    for predicate in expression.predicates() {
        let mut kept = Vec::with_capacity(result.len());
        for candidate in result {
            if predicate.holds(&candidate, store)? {
                kept.push(candidate);
            }
        }
        result = kept;
        if result.is_empty() {
            break;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use oxigraph::model::{GraphName, Literal, Quad, Term};
    use oxigraph::store::Store;

    use super::*;

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(s).unwrap()
    }

    fn insert(store: &Store, s: &NamedNode, p: &NamedNode, o: impl Into<Term>) {
        store
            .insert(&Quad::new(
                s.clone(),
                p.clone(),
                o.into(),
                GraphName::DefaultGraph,
            ))
            .unwrap();
    }

    #[test]
    fn filters_candidates_through_every_predicate() {
        let store = Store::new().unwrap();
        let e1 = iri("http://example.org/e1");
        let e2 = iri("http://example.org/e2");
        let e3 = iri("http://example.org/e3");
        let color = iri("http://example.org/color");
        let size = iri("http://example.org/size");

        insert(&store, &e1, &color, Literal::new_simple_literal("red"));
        insert(&store, &e2, &color, Literal::new_simple_literal("red"));
        insert(&store, &e3, &color, Literal::new_simple_literal("blue"));
        insert(&store, &e1, &size, Literal::new_simple_literal("big"));
        insert(&store, &e2, &size, Literal::new_simple_literal("small"));

        let mut expr = ReferringExpression::new(e1.clone());
        expr.add_positive_value(
            color,
            Term::from(Literal::new_simple_literal("red")),
        );
        expr.add_positive_value(size, Term::from(Literal::new_simple_literal("big")));

        let candidates = [e1.clone(), e2, e3];
        let resolved = resolve(&expr, &candidates, &store).unwrap();
        assert_eq!(resolved, vec![e1]);
    }

    #[test]
    fn empty_expression_keeps_all_candidates() {
        let store = Store::new().unwrap();
        let e1 = iri("http://example.org/e1");
        let e2 = iri("http://example.org/e2");

        let expr = ReferringExpression::new(e1.clone());
        let candidates = [e1, e2];
        let resolved = resolve(&expr, &candidates, &store).unwrap();
        assert_eq!(resolved, candidates.to_vec());
    }

    #[test]
    fn short_circuits_once_nothing_survives() {
        let store = Store::new().unwrap();
        let e1 = iri("http://example.org/e1");
        let color = iri("http://example.org/color");

        let mut expr = ReferringExpression::new(e1.clone());
        expr.add_positive_value(
            color.clone(),
            Term::from(Literal::new_simple_literal("red")),
        );
        expr.add_positive_value(color, Term::from(Literal::new_simple_literal("blue")));

        let resolved = resolve(&expr, &[e1], &store).unwrap();
        assert!(resolved.is_empty());
    }
}
