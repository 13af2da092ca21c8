//! # refex
//!
//! Referring-expression generation over RDF knowledge graphs: given a target
//! entity (the *referent*) and a set of competitors (the *confusors*), select
//! a minimal set of facts that holds for the referent and fails for every
//! confusor.
//!
//! ## Architecture
//!
//! - **Fact store** (`store`): wildcard statement lookup over oxigraph
//! - **Priorities** (`priorities`): per-type predicate rankings + ignore-lists
//! - **Description model** (`expression`): ordered signed fact templates
//! - **Selectors** (`select`): three interchangeable strategies — greedy
//!   incremental, minimum-cardinality constraint search, and branch-and-bound
//!   subgraph search with a wall-clock budget
//! - **Resolution filter** (`resolver`): applies a description back against
//!   the store, for verification
//!
//! ## Library usage
//!
//! ```no_run
//! use oxigraph::store::Store;
//! use refex::priorities::PriorityConfig;
//! use refex::select::Selector;
//! use refex::select::incremental::IncrementalSelector;
//! use refex::store::parse_iri;
//!
//! let store = Store::new().unwrap();
//! // ... load facts ...
//! let referent = parse_iri("http://example.org/redball").unwrap();
//! let confusor = parse_iri("http://example.org/blueball").unwrap();
//!
//! let config = PriorityConfig::new()
//!     .with_priorities("http://example.org/ball", &["type", "color"]);
//! let selector = IncrementalSelector::new(config);
//! let description = selector.resolve(&referent, &[confusor], &store).unwrap();
//! println!("{description}");
//! ```

pub mod error;
pub mod expression;
pub mod priorities;
pub mod resolver;
pub mod select;
pub mod store;
