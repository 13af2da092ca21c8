//! Oxigraph-backed fact store.
//!
//! Wraps [`oxigraph::store::Store`] behind the [`FactStore`] trait and adds
//! N-Triples bulk loading. All queries are scoped to the default graph.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphNameRef, NamedNode, Subject, Term};
use oxigraph::store::Store;

use crate::error::StoreError;

use super::{FactStore, Statement, StoreResult};

impl FactStore for Store {
    fn statements(
        &self,
        subject: Option<&NamedNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> StoreResult<Vec<Statement>> {
        let mut result = Vec::new();
        for quad in self.quads_for_pattern(
            subject.map(Into::into),
            predicate.map(Into::into),
            object.map(Into::into),
            Some(GraphNameRef::DefaultGraph),
        ) {
            let quad = quad.map_err(|e| StoreError::Backend {
                message: e.to_string(),
            })?;
            // Blank-node subjects fall outside the entity model.
            let subject = match quad.subject {
                Subject::NamedNode(n) => n,
                _ => continue,
            };
            result.push(Statement {
                subject,
                predicate: quad.predicate,
                object: quad.object,
            });
        }
        Ok(result)
    }
}

/// Create an empty in-memory store.
pub fn memory_store() -> StoreResult<Store> {
    Store::new().map_err(|e| StoreError::Backend {
        message: e.to_string(),
    })
}

/// Load an N-Triples file into the store's default graph.
pub fn load_ntriples(store: &Store, path: &Path) -> StoreResult<()> {
    let file = File::open(path).map_err(|source| StoreError::Io { source })?;
    store
        .load_from_reader(RdfFormat::NTriples, BufReader::new(file))
        .map_err(|e| StoreError::Load {
            message: e.to_string(),
        })
}
