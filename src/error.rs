use derive_more::Display;

/// Errors detected while assembling the model, before any solve is attempted.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConstructionError {
    /// A facility referenced by the model has no entry in the topology table
    #[display(fmt = "facility `{}` has no origin/destination mapping", facility)]
    UnknownFacility { facility: String },
    /// Two facilities map to the same origin (or destination) label
    #[display(fmt = "node label `{}` is used by more than one facility", label)]
    DuplicateNodeLabel { label: String },
    /// The instance names a parameter the model does not know about
    #[display(fmt = "unknown parameter `{}`", name)]
    UnknownParameter { name: String },
    /// A parameter entry uses a key that is not drawn from its index sets
    #[display(fmt = "key {:?} is outside the domain of parameter `{}`", key, parameter)]
    OutOfDomain { parameter: String, key: Vec<String> },
    /// A parameter entry has the wrong number of key components
    #[display(
        fmt = "parameter `{}` expects {} key components, got {}",
        parameter,
        expected,
        actual
    )]
    ArityMismatch {
        parameter: String,
        expected: usize,
        actual: usize,
    },
    /// A lower bound exceeds its upper bound
    #[display(fmt = "inconsistent bounds for `{}`: {} > {}", name, lower, upper)]
    InconsistentBounds { name: String, lower: f64, upper: f64 },
    /// A set that must be non-empty is empty
    #[display(fmt = "set `{}` must not be empty", set)]
    EmptySet { set: String },
    /// The same element is listed twice in a set
    #[display(fmt = "element `{}` appears more than once in set `{}`", element, set)]
    DuplicateElement { set: String, element: String },
}

impl std::error::Error for ConstructionError {}

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "model construction failed: {}", _0)]
    Construction(ConstructionError),
    /// None of the configured solver backends could be used
    #[display(fmt = "no solver available (tried: {:?})", tried)]
    SolverUnavailable { tried: Vec<String> },
    /// The backend failed for a reason other than a termination status
    #[display(fmt = "solver failure: {}", _0)]
    Solver(String),
    #[display(fmt = "i/o error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "invalid instance file: {}", _0)]
    Json(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Construction(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstructionError> for Error {
    fn from(e: ConstructionError) -> Self {
        Error::Construction(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

#[cfg(feature = "gurobi")]
impl From<grb::Error> for Error {
    fn from(e: grb::Error) -> Self {
        Error::Solver(format!("{:?}", e))
    }
}

/// A diagnostic that could not be produced in the current solver/environment
/// combination. Never propagated; logged and skipped.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "{} unavailable: {}", diagnostic, reason)]
pub struct DiagnosticUnavailable {
    pub diagnostic: &'static str,
    pub reason: String,
}

impl std::error::Error for DiagnosticUnavailable {}

pub type Result<T> = std::result::Result<T, Error>;
