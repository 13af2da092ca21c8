//! Referring expressions: ordered sets of signed fact templates.
//!
//! A [`ReferringExpression`] describes one entity by a sequence of
//! [`Predicate`] entries. Each entry is a fact template whose subject or
//! object slot may be *implicit*, standing for whichever entity the template
//! is being tested against. A positive entry asserts the instantiated fact
//! exists in the store; a negative entry asserts it does not. The entry order
//! is insertion order and only matters for display: the set as a whole must
//! hold for the referent and fail for every confusor.

use std::fmt;

use oxigraph::model::{NamedNode, Term};

use crate::store::{FactStore, Statement, StoreResult};

/// A single signed fact template.
///
/// `None` in the subject or object slot means "substitute the entity under
/// test". At most one slot is implicit in practice, but nothing depends on
/// that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    subject: Option<NamedNode>,
    predicate: NamedNode,
    object: Option<Term>,
    negative: bool,
}

impl Predicate {
    /// The explicit subject, if any.
    pub fn subject(&self) -> Option<&NamedNode> {
        self.subject.as_ref()
    }

    /// The predicate IRI.
    pub fn predicate(&self) -> &NamedNode {
        &self.predicate
    }

    /// The explicit object, if any.
    pub fn object(&self) -> Option<&Term> {
        self.object.as_ref()
    }

    /// Whether this entry asserts the absence of the fact.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Test the template against a candidate entity.
    ///
    /// Substitutes the candidate into the implicit slot(s) and checks the
    /// store: a positive entry holds when at least one matching fact exists,
    /// a negative entry when none does.
    pub fn holds(&self, candidate: &NamedNode, store: &dyn FactStore) -> StoreResult<bool> {
        let subject = self.subject.clone().unwrap_or_else(|| candidate.clone());
        let object = self
            .object
            .clone()
            .unwrap_or_else(|| Term::from(candidate.clone()));
        let present = store.contains(&subject, &self.predicate, &object)?;
        Ok(present != self.negative)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(s) => write!(f, "{s}")?,
            None => write!(f, "_")?,
        }
        write!(
            f,
            "\t{}\t{}\t",
            if self.negative { "NOT" } else { "" },
            self.predicate
        )?;
        match &self.object {
            Some(o) => write!(f, "{o}"),
            None => write!(f, "_"),
        }
    }
}

/// An ordered sequence of signed fact templates describing one entity.
///
/// The referent is held only during construction, to normalize slots that
/// mention it into implicit slots; it is not part of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferringExpression {
    referent: Option<NamedNode>,
    predicates: Vec<Predicate>,
}

impl ReferringExpression {
    /// Create an empty expression for the given referent.
    pub fn new(referent: NamedNode) -> Self {
        Self {
            referent: Some(referent),
            predicates: Vec::new(),
        }
    }

    /// The referent this expression was built for, if still attached.
    pub fn referent(&self) -> Option<&NamedNode> {
        self.referent.as_ref()
    }

    /// The entries, in insertion order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether any entry is negative.
    pub fn has_negatives(&self) -> bool {
        self.predicates.iter().any(Predicate::is_negative)
    }

    /// Append a positive entry for an existing fact.
    pub fn add_positive(&mut self, stmt: &Statement) {
        self.push(
            Some(stmt.subject.clone()),
            stmt.predicate.clone(),
            Some(stmt.object.clone()),
            false,
        );
    }

    /// Append a positive entry with an implicit subject.
    pub fn add_positive_value(&mut self, predicate: NamedNode, object: Term) {
        self.push(None, predicate, Some(object), false);
    }

    /// Append a negative entry with an implicit subject.
    pub fn add_negative_value(&mut self, predicate: NamedNode, object: Term) {
        self.push(None, predicate, Some(object), true);
    }

    /// Append an entry with explicit slots.
    pub fn add_entry(
        &mut self,
        subject: Option<NamedNode>,
        predicate: NamedNode,
        object: Option<Term>,
        negative: bool,
    ) {
        self.push(subject, predicate, object, negative);
    }

    /// Slots naming the referent become implicit.
    fn push(
        &mut self,
        subject: Option<NamedNode>,
        predicate: NamedNode,
        object: Option<Term>,
        negative: bool,
    ) {
        let subject = subject.filter(|s| Some(s) != self.referent.as_ref());
        let object = object.filter(|o| match (o, self.referent.as_ref()) {
            (Term::NamedNode(n), Some(r)) => n != r,
            _ => true,
        });
        self.predicates.push(Predicate {
            subject,
            predicate,
            object,
            negative,
        });
    }
}

impl fmt::Display for ReferringExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pred) in self.predicates.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{pred}")?;
        }
        Ok(())
    }
}
