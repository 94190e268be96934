//! Error types for template parsing and formatting.
//!
//! This module provides error reporting with positional context to help
//! diagnose malformed templates and incompatible specifiers.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: Malformed field syntax with byte-offset information
//! - **Specifier Errors**: A specifier that is incompatible with the supplied
//!   argument (e.g. a sign flag on a string)
//! - **Resolution Errors**: Argument index or name not present in the list
//! - **Capacity Errors**: A fixed-capacity output buffer that cannot hold
//!   the result
//!
//! ## Examples
//!
//! ```rust
//! use strform::{format, args, Error};
//!
//! let result = format("{0} and {}", &args![1, 2]);
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Format error: {}", err);
//!     // "cannot switch from manual to automatic argument indexing"
//! }
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while parsing a template or
/// formatting arguments into it.
///
/// Each error variant includes contextual information to aid debugging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed template syntax
    #[error("parse error at byte {pos}: {msg}")]
    Parse { pos: usize, msg: String },

    /// Specifier incompatible with the supplied argument
    #[error("format error at byte {pos}: {msg}")]
    Spec { pos: usize, msg: String },

    /// Argument index or name could not be resolved
    #[error("argument not found: {which}")]
    ArgumentNotFound { which: String },

    /// A fixed-capacity output buffer cannot hold the result
    #[error("output capacity exceeded: needed {needed} bytes, capacity is {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// IO error while writing formatted output to a writer
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised by a user-defined formatter
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error with the byte offset of the offending construct.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strform::Error;
    ///
    /// let err = Error::parse(4, "unmatched '}' in format string");
    /// assert!(err.to_string().contains("byte 4"));
    /// ```
    pub fn parse(pos: usize, msg: &str) -> Self {
        Error::Parse {
            pos,
            msg: msg.to_string(),
        }
    }

    /// Creates a specifier error (well-formed syntax, incompatible semantics).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strform::Error;
    ///
    /// let err = Error::spec(2, "format specifier requires numeric argument");
    /// assert!(err.to_string().contains("numeric argument"));
    /// ```
    pub fn spec(pos: usize, msg: &str) -> Self {
        Error::Spec {
            pos,
            msg: msg.to_string(),
        }
    }

    /// Creates a resolution error for a missing positional argument.
    pub fn index_not_found(index: usize) -> Self {
        Error::ArgumentNotFound {
            which: format!("index {}", index),
        }
    }

    /// Creates a resolution error for a missing named argument.
    pub fn name_not_found(name: &str) -> Self {
        Error::ArgumentNotFound {
            which: format!("name \"{}\"", name),
        }
    }

    /// Creates a capacity error for a fixed-size buffer overflow.
    pub fn capacity(needed: usize, capacity: usize) -> Self {
        Error::CapacityExceeded { needed, capacity }
    }

    /// Creates a custom error with a display message.
    ///
    /// Intended for user-defined formatters that need to signal failure
    /// through the engine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strform::Error;
    ///
    /// let err = Error::custom("unsupported color name");
    /// assert!(err.to_string().contains("unsupported color name"));
    /// ```
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
