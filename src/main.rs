//! refex CLI: select a referring expression from N-Triples data.
//!
//! Reads facts for all entities from an N-Triples file, runs the chosen
//! selector for a referent against its confusors, and prints the selected
//! statements to standard output.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use oxigraph::model::vocab::rdf;
use oxigraph::model::QuadRef;

use refex::priorities::PriorityConfig;
use refex::resolver;
use refex::select::Selector;
use refex::select::constraint::ConstraintSelector;
use refex::select::graph::GraphSelector;
use refex::select::incremental::IncrementalSelector;
use refex::store::rdf::{load_ntriples, memory_store};
use refex::store::parse_iri;

#[derive(Parser)]
#[command(name = "refex", version, about = "Referring-expression selection over RDF facts")]
struct Cli {
    /// N-Triples file with statements for all entities.
    #[arg(long)]
    rdf: PathBuf,

    /// IRI of the referent.
    #[arg(long)]
    referent: String,

    /// IRIs of the confusors.
    #[arg(long, num_args = 1.., required = true)]
    confusors: Vec<String>,

    /// Selection strategy.
    #[arg(long, value_enum, default_value_t = SelectorKind::Incremental)]
    selector: SelectorKind,

    /// Extra rdf:type to assert for the referent before selecting.
    #[arg(long = "type")]
    type_iri: Option<String>,

    /// TOML priority configuration (default: built-in dbpedia table).
    #[arg(long)]
    priorities: Option<PathBuf>,

    /// Wall-clock budget for the graph selector, in milliseconds.
    #[arg(long, default_value_t = 60_000)]
    timeout_ms: u64,

    /// Emit the description as JSON instead of tab-separated text.
    #[arg(long)]
    json: bool,

    /// Re-apply the description to confusors + referent and report what it
    /// picks out.
    #[arg(long)]
    verify: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum SelectorKind {
    /// Greedy priority-ordered selection (Dale & Reiter).
    Incremental,
    /// Minimum-cardinality constraint search (Gardent).
    Constraint,
    /// Branch-and-bound subgraph search (Krahmer et al.).
    Graph,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = memory_store()?;
    load_ntriples(&store, &cli.rdf)?;

    let referent = parse_iri(&cli.referent)?;
    let confusors = cli
        .confusors
        .iter()
        .map(|c| parse_iri(c))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(type_iri) = &cli.type_iri {
        let ty = parse_iri(type_iri)?;
        store
            .insert(QuadRef::new(
                &referent,
                rdf::TYPE,
                &ty,
                oxigraph::model::GraphNameRef::DefaultGraph,
            ))
            .into_diagnostic()?;
    }

    let config = match &cli.priorities {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|source| refex::error::ConfigError::Io { source })?;
            PriorityConfig::from_toml_str(&text)?
        }
        None => PriorityConfig::dbpedia(),
    };

    let selector: Box<dyn Selector> = match cli.selector {
        SelectorKind::Incremental => Box::new(IncrementalSelector::new(config)),
        SelectorKind::Constraint => Box::new(ConstraintSelector::new(config)),
        SelectorKind::Graph => Box::new(
            GraphSelector::new(config).with_timeout(Duration::from_millis(cli.timeout_ms)),
        ),
    };

    let expression = selector.resolve(&referent, &confusors, &store)?;

    if cli.json {
        let predicates: Vec<serde_json::Value> = expression
            .predicates()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "subject": p.subject().map(|s| s.as_str()),
                    "predicate": p.predicate().as_str(),
                    "object": p.object().map(|o| o.to_string()),
                    "negative": p.is_negative(),
                })
            })
            .collect();
        let doc = serde_json::json!({
            "referent": referent.as_str(),
            "predicates": predicates,
        });
        println!("{}", serde_json::to_string_pretty(&doc).into_diagnostic()?);
    } else {
        println!("{expression}");
    }

    if cli.verify {
        let mut candidates = confusors.clone();
        candidates.push(referent.clone());
        let resolved = resolver::resolve(&expression, &candidates, &store)?;
        if resolved == [referent.clone()] {
            eprintln!("verified: description resolves to exactly the referent");
        } else {
            eprintln!(
                "warning: description resolves to {:?}",
                resolved.iter().map(|e| e.as_str()).collect::<Vec<_>>()
            );
        }
    }

    Ok(())
}
