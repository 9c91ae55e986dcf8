//! Loading N-Triples / N-Quads documents into a store of oxigraph terms.
//!
//! oxigraph's `Term` is the tagged node type (IRI, blank node, literal) the
//! store treats as opaque; quads in the default graph land in the `None`
//! context, named and blank graph names become named contexts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{GraphName, Quad, Term};

use crate::core::{Assertion, Triple};
use crate::error::{Error, Result};
use crate::storage::TripleStore;

/// Splits a quad into its triple and the context it belongs to.
pub fn split_quad(quad: Quad) -> (Triple<Term>, Option<Term>) {
    let context = match quad.graph_name {
        GraphName::NamedNode(node) => Some(node.into()),
        GraphName::BlankNode(node) => Some(node.into()),
        GraphName::DefaultGraph => None,
    };
    let triple = Triple::new(quad.subject.into(), quad.predicate.into(), quad.object);
    (triple, context)
}

/// Parses `reader` as `format` and adds every statement to `store`.
/// Returns the number of statements read.
pub fn load_reader<S, R>(store: &mut S, reader: R, format: RdfFormat) -> Result<usize>
where
    S: TripleStore<Term>,
    R: Read,
{
    let mut count = 0;
    for quad in RdfParser::from_format(format).for_reader(reader) {
        let quad = quad.map_err(|e| Error::Parse(e.to_string()))?;
        let (triple, context) = split_quad(quad);
        store.add(&triple, context.as_ref(), Assertion::Asserted)?;
        count += 1;
    }
    log::debug!("loaded {} statements as {}", count, format.name());
    Ok(count)
}

/// Loads a file, picking the format from its extension unless given.
pub fn load_file<S>(store: &mut S, path: &Path, format: Option<RdfFormat>) -> Result<usize>
where
    S: TripleStore<Term>,
{
    let format = match format {
        Some(format) => format,
        None => format_from_path(path)?,
    };
    let file = File::open(path)?;
    load_reader(store, BufReader::new(file), format)
}

/// N-Triples or N-Quads, from the file extension.
pub fn format_from_path(path: &Path) -> Result<RdfFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match RdfFormat::from_extension(extension) {
        Some(format @ (RdfFormat::NTriples | RdfFormat::NQuads)) => Ok(format),
        _ => Err(Error::Config(format!(
            "cannot load {}: expected a .nt or .nq file",
            path.display()
        ))),
    }
}

/// Parses a single term in N-Triples syntax, e.g. `<http://example.org/a>`
/// or `"23.5"^^<http://www.w3.org/2001/XMLSchema#decimal>`.
pub fn parse_term(input: &str) -> Result<Term> {
    Term::from_str(input.trim()).map_err(|e| Error::Parse(format!("{}: {}", input, e)))
}
