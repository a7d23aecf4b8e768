//! RDF vocabulary constants for the multilingual label properties
//!
//! Constants are organized by vocabulary:
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `skos` - SKOS core vocabulary (http://www.w3.org/2004/02/skos/core#)
//! - `schema_org` - schema.org vocabulary

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// SKOS core vocabulary constants
pub mod skos {
    /// skos:altLabel IRI
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
}

/// schema.org vocabulary constants
pub mod schema_org {
    /// schema:description IRI
    pub const DESCRIPTION: &str = "http://schema.org/description";
}
