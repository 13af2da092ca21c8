//! Rich diagnostic error types for refex.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly why a resolution
//! failed and what to change.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for refex.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum RefexError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Select(#[from] SelectError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error: {source}")]
    #[diagnostic(
        code(refex::store::io),
        help("A filesystem operation failed. Check that the file exists and is readable.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("store backend error: {message}")]
    #[diagnostic(
        code(refex::store::backend),
        help("The underlying RDF store failed while answering a statement query.")
    )]
    Backend { message: String },

    #[error("failed to load RDF data: {message}")]
    #[diagnostic(
        code(refex::store::load),
        help(
            "The input could not be parsed as N-Triples. Check the file for \
             malformed lines; every triple must end with ' .' and use absolute IRIs."
        )
    )]
    Load { message: String },

    #[error("invalid IRI '{iri}': {message}")]
    #[diagnostic(
        code(refex::store::invalid_iri),
        help("Entity identifiers must be absolute IRIs, e.g. 'http://example.org/e1'.")
    )]
    InvalidIri { iri: String, message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to parse priority configuration: {message}")]
    #[diagnostic(
        code(refex::config::parse),
        help(
            "The priority file must be TOML with `[priorities]` and optional \
             `[ignored]` tables mapping type IRIs to lists of predicate names."
        )
    )]
    Parse { message: String },

    #[error("failed to serialize priority configuration: {message}")]
    #[diagnostic(code(refex::config::serialize))]
    Serialize { message: String },

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(refex::config::io),
        help("The priority configuration file could not be read.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Selection errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SelectError {
    #[error("no type known for referent '{referent}'")]
    #[diagnostic(
        code(refex::select::unknown_referent_type),
        help(
            "The referent has no rdf:type statement in the store. Add one, or \
             pass an explicit type on the command line."
        )
    )]
    UnknownReferentType { referent: String },

    #[error("no priorities for referent '{referent}' with types [{types}]")]
    #[diagnostic(
        code(refex::select::no_priorities),
        help(
            "None of the referent's types has an entry in the priority \
             configuration. Add a priority list for one of its types."
        )
    )]
    NoPrioritiesForType { referent: String, types: String },

    #[error("no information available for confusor '{confusor}'")]
    #[diagnostic(
        code(refex::select::no_confusor_information),
        help(
            "The confusor has zero statements in the store, so nothing can \
             distinguish it from the referent. Add facts about it or drop it \
             from the confusor set."
        )
    )]
    NoInformationForConfusor { confusor: String },

    #[error("confusors left unresolved: {remaining:?}")]
    #[diagnostic(
        code(refex::select::remaining_confusors),
        help(
            "The search exhausted its options with these confusors still \
             indistinguishable from the referent. The store may lack facts \
             that set the referent apart, or the priority list may be missing \
             the predicates that do."
        )
    )]
    RemainingConfusorsUnresolved { remaining: Vec<String> },

    #[error("no description of size <= {max_cardinality} exists")]
    #[diagnostic(
        code(refex::select::no_solution),
        help(
            "No combination of up to max_cardinality facts distinguishes the \
             referent from every confusor by exactly one difference each. \
             Raise the bound with `with_max_cardinality`, or check the data."
        )
    )]
    NoSolutionFound { max_cardinality: usize },

    #[error("search exceeded its {budget_ms} ms budget")]
    #[diagnostic(
        code(refex::select::timeout),
        help(
            "The subgraph search is worst-case exponential in the number of \
             entities and facts. Raise the budget with `with_timeout`, or \
             reduce the confusor set."
        )
    )]
    Timeout { budget_ms: u64 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for functions returning refex results.
pub type RefexResult<T> = std::result::Result<T, RefexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_error_converts_to_refex_error() {
        let err = SelectError::UnknownReferentType {
            referent: "http://example.org/e1".into(),
        };
        let refex: RefexError = err.into();
        assert!(matches!(
            refex,
            RefexError::Select(SelectError::UnknownReferentType { .. })
        ));
    }

    #[test]
    fn store_error_converts_to_refex_error() {
        let err = StoreError::Backend {
            message: "test".into(),
        };
        let refex: RefexError = err.into();
        assert!(matches!(refex, RefexError::Store(StoreError::Backend { .. })));
    }

    #[test]
    fn select_error_wraps_store_error() {
        let store_err = StoreError::Backend {
            message: "test".into(),
        };
        let select_err: SelectError = store_err.into();
        assert!(matches!(select_err, SelectError::Store(StoreError::Backend { .. })));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = SelectError::Timeout { budget_ms: 60_000 };
        let msg = format!("{err}");
        assert!(msg.contains("60000"));

        let err = SelectError::RemainingConfusorsUnresolved {
            remaining: vec!["http://example.org/c1".into()],
        };
        let msg = format!("{err}");
        assert!(msg.contains("c1"));
    }
}
