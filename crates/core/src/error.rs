//! Error type shared by every stage of the generator.
//!
//! Malformed input (bad XML, unknown elements, include problems) and internal
//! invariant violations both surface as [`GenError`]. Nothing is recoverable:
//! the first error aborts the run before any output file is touched.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Every way a generation run can fail.
#[derive(Debug, Error)]
pub enum GenError {
    /// A fragment or output file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A fragment is not well-formed XML.
    #[error("{}: {source}", path.display())]
    Xml {
        /// Fragment being parsed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: roxmltree::Error,
    },

    /// An element appeared somewhere it has no meaning.
    #[error("unexpected <{element}> inside <{container}>")]
    UnexpectedElement {
        /// Tag name of the offending element.
        element: String,
        /// Tag name of the element that contains it.
        container: String,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Tag name of the element.
        element: String,
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// A function declares its return type more than once.
    #[error("too many <return> declarations in function '{function}'")]
    TooManyReturns {
        /// Declared name of the function.
        function: String,
    },

    /// A fragment includes itself, directly or through other fragments.
    #[error("include cycle through {}", path.display())]
    IncludeCycle {
        /// Fragment that was reached a second time.
        path: PathBuf,
    },

    /// A dispatch set ended up with no member declarations.
    #[error("internal error: empty dispatch set")]
    EmptyDispatchSet,

    /// A function name has no entry in the synonym map.
    #[error("internal error: no synonym set recorded for '{name}'")]
    UnknownSynonym {
        /// Name that was looked up.
        name: String,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unexpected(element: &str, container: &str) -> Self {
        Self::UnexpectedElement {
            element: element.to_string(),
            container: container.to_string(),
        }
    }

    pub(crate) fn missing(element: &str, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute,
        }
    }
}
