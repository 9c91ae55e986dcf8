//! RDF document loading

pub mod rdf_parser;
