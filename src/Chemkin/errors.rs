use thiserror::Error;

/// Error types for parsing Chemkin-format mechanism files.
///
/// Every variant is fatal to the current parse and carries enough context
/// (species label, reaction equation, offending field) to point a user at the
/// source line. The one deliberate soft condition - thermo/transport data for
/// a species the mechanism never declared - is not an error at all: it is
/// logged and skipped (supplementary data files routinely list species the
/// active mechanism does not use).
#[derive(Debug, Error)]
pub enum ChemkinError {
    #[error("malformed number '{field}'")]
    MalformedNumber { field: String },
    #[error("unknown unit token '{0}' in REACTIONS header")]
    UnknownUnit(String),
    #[error("error while reading thermo entry for species {species}")]
    ThermoEntry { species: String },
    #[error("failed to find reactant/product delimiter in reaction '{0}'")]
    MissingArrow(String),
    #[error("unexpected species \"{label}\" in reaction {reaction}")]
    UnknownSpecies { label: String, reaction: String },
    #[error("invalid number of reactant species ({order}) for reaction {reaction}")]
    InvalidReactionOrder { order: f64, reaction: String },
    #[error("missing TCHEB or PCHEB line for reaction {0}")]
    MissingChebyshevBounds(String),
    #[error("expected {expected} Chebyshev coefficients for reaction {reaction}, found {found}")]
    ChebyshevCoefficientCount {
        expected: usize,
        found: usize,
        reaction: String,
    },
    #[error("TROE or SRI parameters given without a LOW line for reaction {0}")]
    MissingLowRate(String),
    #[error("encountered unmarked duplicate reaction {0}")]
    UnmarkedDuplicateReaction(String),
    #[error("no thermo data found for species '{0}'")]
    MissingThermoData(String),
    #[error("undefined elements: {0:?}")]
    UndefinedElements(Vec<String>),
    #[error("unable to parse transport data: {0}")]
    TransportEntry(String),
    #[error("file '{0}' does not exist")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
