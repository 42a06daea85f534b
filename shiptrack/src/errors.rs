use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for shiptrack operations.
///
/// Each kind describes one category of failure so callers can match on the
/// category instead of parsing messages.
///
/// # Examples
///
/// ```rust,ignore
/// use shiptrack::errors::{ErrorKind, ShiptrackError, ShiptrackResult};
///
/// fn example() -> ShiptrackResult<()> {
///     Err(ShiptrackError::new("Shipment not found", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A shipment with the same identifier is already registered
    DuplicateId,
    /// The requested shipment was not found
    NotFound,
    /// A field value has the wrong type or is out of range
    InvalidDataType,
    /// The operation is not valid in the current state
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DuplicateId => write!(f, "Duplicate identifier"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for all fallible shiptrack operations.
///
/// `ShiptrackError` carries a message, an [`ErrorKind`], an optional cause for
/// error chaining, and a backtrace captured at construction time.
///
/// No operation in this crate terminates the process; every failure surfaces
/// as a value of this type through [`ShiptrackResult`].
#[derive(Clone)]
pub struct ShiptrackError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<ShiptrackError>>,
    backtrace: Atomic<Backtrace>,
}

impl ShiptrackError {
    /// Creates a new `ShiptrackError` with the specified message and kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        ShiptrackError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `ShiptrackError` chained onto an underlying cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: ShiptrackError) -> Self {
        ShiptrackError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&ShiptrackError> {
        self.cause.as_deref()
    }
}

impl Display for ShiptrackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for ShiptrackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for ShiptrackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for shiptrack operations.
///
/// `ShiptrackResult<T>` is shorthand for `Result<T, ShiptrackError>`.
pub type ShiptrackResult<T> = Result<T, ShiptrackError>;

// From trait implementations for automatic error conversion
impl From<std::num::ParseIntError> for ShiptrackError {
    fn from(err: std::num::ParseIntError) -> Self {
        ShiptrackError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::num::ParseFloatError> for ShiptrackError {
    fn from(err: std::num::ParseFloatError) -> Self {
        ShiptrackError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<String> for ShiptrackError {
    fn from(msg: String) -> Self {
        ShiptrackError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for ShiptrackError {
    fn from(msg: &str) -> Self {
        ShiptrackError::new(msg, ErrorKind::InternalError)
    }
}
