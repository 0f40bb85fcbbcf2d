use std::{fmt::{Display, Formatter}, sync::PoisonError};
use log::SetLoggerError;

/// Owned description of a poisoned lock, so it can outlive the guard and be
/// boxed into an [`std::io::Error`].
#[derive(Debug)]
pub struct PoisonErrorWrapper(String);

impl Display for PoisonErrorWrapper {
    fn fmt(&self, fmt: &mut Formatter) -> std::fmt::Result {
        self.0.fmt(fmt)
    }
}
impl std::error::Error for PoisonErrorWrapper {}

impl<T> From<PoisonError<T>> for PoisonErrorWrapper {
    fn from(error: PoisonError<T>) -> Self {
        Self(error.to_string())
    }
}


/// A logger that failed to install. Kept as text, like
/// [`PoisonErrorWrapper`], so the two read the same once boxed.
#[derive(Debug)]
pub struct ErrorWrapper(String);

impl Display for ErrorWrapper {
    fn fmt(&self, fmt: &mut Formatter) -> std::fmt::Result {
        self.0.fmt(fmt)
    }
}
impl std::error::Error for ErrorWrapper {}

impl From<SetLoggerError> for ErrorWrapper {
    fn from(error: SetLoggerError) -> Self {
        Self(format!("logger already installed: {error}"))
    }
}

pub mod shortcuts {
    pub use std::io::{
        Error as IOError,
        ErrorKind as IOErrorKind,
        Result as IOResult,
    };

    /// Lifts any error into an [`IOError`] of kind `Other`, the way the
    /// logging setup reports lock and logger failures.
    pub fn other_io_error<E>(error: E) -> IOError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        IOError::new(IOErrorKind::Other, error)
    }
}
