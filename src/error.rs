use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Most of the inspection engine is deliberately forgiving: unresolvable references degrade to
/// "treat as public", malformed generic names fall back to their raw form, and degenerate
/// members (a property without accessors, an event without adder/remover) are simply dropped.
/// The variants below cover the conditions that genuinely stop an operation.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`Error::TypeNotFound`] - The requested type is unknown to the metadata source
/// - [`Error::AssemblyLoad`] - A lazily loaded assembly failed to produce its definitions
///
/// ## Structural Errors
/// - [`Error::Malformed`] - Definitions violate a structural requirement
/// - [`Error::MalformedGenericName`] - A generic name could not be localized or unlocalized
/// - [`Error::RecursionLimit`] - An inheritance chain exceeded the configured depth
///
/// ## Linking Errors
/// - [`Error::Documentation`] - A documentation XML file could not be parsed
///
/// # Examples
///
/// ```rust
/// use docscope::{Error, Inspector, InspectionOptions, MetadataStore};
///
/// let store = MetadataStore::new();
/// let inspector = Inspector::new(&store, InspectionOptions::default());
///
/// match inspector.inspect("Missing.Type") {
///     Err(Error::TypeNotFound(name)) => assert_eq!(name, "Missing.Type"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The definitions are damaged and could not be processed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to find a type in the metadata source.
    ///
    /// The associated value is the namespace-qualified metadata name that was requested.
    #[error("Failed to find type in metadata source - {0}")]
    TypeNotFound(String),

    /// A generic type name could not be localized.
    ///
    /// Raised when an arity placeholder asks for more generic arguments than are in scope,
    /// or when angle brackets are unbalanced. Callers inside the engine catch this per name
    /// and fall back to the raw unlocalized name.
    #[error("Malformed generic name - {0}")]
    MalformedGenericName(String),

    /// Recursion limit reached.
    ///
    /// Walking the base-type chain stops after the configured maximum depth, which
    /// guards against cyclic inheritance in damaged metadata.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// An assembly loader failed.
    #[error("Failed to load assembly '{assembly}': {message}")]
    AssemblyLoad {
        /// Name of the assembly that was requested
        assembly: String,
        /// Loader supplied failure description
        message: String,
    },

    /// A documentation XML file could not be parsed.
    #[error("Invalid documentation file - {0}")]
    Documentation(String),
}
