use std::fmt::{Display, Formatter};
use std::io::Error as IOError;
use std::path::PathBuf;

use action_output_env::EnvVarErr;

use crate::env::CHECK_ENV_VARS_LEN;

/// Everything that stops a step before its output is recorded.
#[derive(Debug)]
pub enum ActionError {
    /// One or more required inputs are empty or unset.
    MissingInputs(EnvVarErr<CHECK_ENV_VARS_LEN>),
    UnknownSink(String),
    /// The output file could not be opened for append.
    OutputUnavailable {
        path: PathBuf,
        source: IOError,
    },
    WriteFailed {
        target: String,
        source: IOError,
    },
}

impl ActionError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ActionError::MissingInputs(_)
            | ActionError::UnknownSink(_)
            | ActionError::OutputUnavailable { .. }
            | ActionError::WriteFailed { .. } => 1,
        }
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::MissingInputs(missing) => {
                write!(f, "Missing required environment variables: {missing}")
            }
            ActionError::UnknownSink(kind) => write!(f, "Unknown output sink '{kind}'"),
            ActionError::OutputUnavailable { path, source } => {
                write!(f, "Error opening {}: {}", path.display(), source)
            }
            ActionError::WriteFailed { target, source } => {
                write!(f, "Error writing {target}: {source}")
            }
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::MissingInputs(missing) => Some(missing),
            ActionError::UnknownSink(_) => None,
            ActionError::OutputUnavailable { source, .. }
            | ActionError::WriteFailed { source, .. } => Some(source),
        }
    }
}

impl From<EnvVarErr<CHECK_ENV_VARS_LEN>> for ActionError {
    fn from(missing: EnvVarErr<CHECK_ENV_VARS_LEN>) -> Self {
        ActionError::MissingInputs(missing)
    }
}
