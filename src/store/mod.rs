//! Fact store: addressable collections of RDF statements.
//!
//! The store is an external collaborator for the selectors: it answers
//! wildcard lookups by any combination of subject, predicate, and object, and
//! is read-only for the duration of a resolution. The shipped backend wraps
//! [`oxigraph::store::Store`] (see [`rdf`]).

pub mod rdf;

use std::fmt;

use oxigraph::model::vocab::rdf as rdf_vocab;
use oxigraph::model::{NamedNode, Term};

use crate::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A single (subject, predicate, object) fact.
///
/// Subjects and predicates are IRIs; objects may be IRIs or literal values.
/// Blank-node subjects are not part of the model and are dropped at the
/// store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    /// The entity the fact is about.
    pub subject: NamedNode,
    /// The relation or attribute name.
    pub predicate: NamedNode,
    /// The value: another entity or a literal.
    pub object: Term,
}

impl Statement {
    /// Create a new statement.
    pub fn new(subject: NamedNode, predicate: NamedNode, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// The local name of an IRI: everything after the last `#`, `/`, or `:`.
///
/// Priority lists and ignore-lists are keyed by local name, so that e.g.
/// `http://example.org/color` and `urn:demo:color` both rank as `color`.
pub fn local_name(iri: &NamedNode) -> &str {
    let s = iri.as_str();
    match s.rfind(['#', '/', ':']) {
        Some(idx) => &s[idx + 1..],
        None => s,
    }
}

/// The lexical value of a term: the IRI for entities, the literal value for
/// literals, the identifier for blank nodes.
pub fn term_value(term: &Term) -> &str {
    match term {
        Term::NamedNode(n) => n.as_str(),
        Term::Literal(l) => l.value(),
        Term::BlankNode(b) => b.as_str(),
        #[allow(unreachable_patterns)]
        _ => "",
    }
}

/// Parse an absolute IRI into an entity identifier.
pub fn parse_iri(iri: &str) -> StoreResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| StoreError::InvalidIri {
        iri: iri.to_string(),
        message: e.to_string(),
    })
}

/// An addressable collection of statements supporting wildcard lookup.
///
/// Any of the three positions may be `None`, meaning "match anything".
/// Implementations must be deterministic: the same store contents must yield
/// the same statement order on repeated queries.
pub trait FactStore {
    /// All statements matching the given pattern.
    fn statements(
        &self,
        subject: Option<&NamedNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> StoreResult<Vec<Statement>>;

    /// All statements mentioning the entity, as subject or as object.
    fn about(&self, entity: &NamedNode) -> StoreResult<Vec<Statement>> {
        let mut stmts = self.statements(Some(entity), None, None)?;
        let as_object = Term::from(entity.clone());
        stmts.extend(self.statements(None, None, Some(&as_object))?);
        Ok(stmts)
    }

    /// The entity's `rdf:type` objects, in store order.
    fn types_of(&self, entity: &NamedNode) -> StoreResult<Vec<NamedNode>> {
        let type_pred = rdf_vocab::TYPE.into_owned();
        Ok(self
            .statements(Some(entity), Some(&type_pred), None)?
            .into_iter()
            .filter_map(|stmt| match stmt.object {
                Term::NamedNode(n) => Some(n),
                _ => None,
            })
            .collect())
    }

    /// Whether the exact statement is present.
    fn contains(
        &self,
        subject: &NamedNode,
        predicate: &NamedNode,
        object: &Term,
    ) -> StoreResult<bool> {
        Ok(!self
            .statements(Some(subject), Some(predicate), Some(object))?
            .is_empty())
    }
}
