//! QStore command-line interface.
//!
//! Loads an N-Triples or N-Quads file into an in-memory store and runs one
//! pattern query (or removal) against it.
//!
//! Usage:
//!   qstore --input data/sensors.nq --predicate '<http://example.org/temperature>'
//!   qstore --input data/sensors.nq --graph '<http://example.org/sensorStream>' --remove --stats

use std::path::PathBuf;

use clap::Parser;
use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use qstore::parsing::rdf_parser::{load_file, parse_term};
use qstore::{QStore, StoreConfig, TriplePattern};

#[derive(Parser, Debug)]
#[command(name = "qstore")]
#[command(about = "Query an RDF document through the QStore in-memory triple store")]
struct Args {
    /// Input file path (N-Triples or N-Quads)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format: nt or nq (default: from the file extension)
    #[arg(short, long)]
    format: Option<String>,

    /// Subject term in N-Triples syntax
    #[arg(short, long)]
    subject: Option<String>,

    /// Predicate term in N-Triples syntax
    #[arg(short, long)]
    predicate: Option<String>,

    /// Object term in N-Triples syntax
    #[arg(short, long)]
    object: Option<String>,

    /// Restrict to this named graph (N-Triples syntax)
    #[arg(short, long)]
    graph: Option<String>,

    /// Remove the matching statements instead of listing them
    #[arg(long)]
    remove: bool,

    /// Print store statistics at the end
    #[arg(long)]
    stats: bool,

    /// Store configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn optional_term(input: Option<&String>) -> qstore::Result<Option<Term>> {
    input.map(|s| parse_term(s)).transpose()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    let format = match args.format.as_deref() {
        None => None,
        Some("nt") => Some(RdfFormat::NTriples),
        Some("nq") => Some(RdfFormat::NQuads),
        Some(other) => return Err(format!("unknown format '{}', expected nt or nq", other).into()),
    };

    let mut store: QStore<Term> = QStore::with_config(config);
    let loaded = load_file(&mut store, &args.input, format)?;
    log::info!("loaded {} statements from {}", loaded, args.input.display());

    let pattern = TriplePattern::new(
        optional_term(args.subject.as_ref())?,
        optional_term(args.predicate.as_ref())?,
        optional_term(args.object.as_ref())?,
    );
    let graph = optional_term(args.graph.as_ref())?;

    if args.remove {
        let removed = store.remove(&pattern, graph.as_ref());
        println!("Removed {} statements", removed);
    } else {
        let matches = store.triples(&pattern, graph.as_ref())?;
        for m in &matches {
            let contexts: Vec<String> = m.contexts.iter().map(ToString::to_string).collect();
            println!(
                "{} {} {} [{}]",
                m.triple.subject,
                m.triple.predicate,
                m.triple.object,
                contexts.join(", ")
            );
        }
        println!("{} matching statements", matches.len());
    }

    if args.stats {
        let stats = store.stats();
        println!("Terms: {}", stats.terms);
        println!("Triples: {}", stats.triples);
        println!(
            "Explicit memberships: {} ({:.1}% compressed)",
            stats.explicit_memberships,
            stats.compression_ratio() * 100.0
        );
        println!("Known contexts: {}", stats.known_contexts);
    }
    Ok(())
}
