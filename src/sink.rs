use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use action_output_env::EnvSource;

use crate::env::{sink_kind, OUTPUT_PATH};
use crate::error::ActionError;
use crate::logging::debug;

/// Destination for the step's `key=value` result.
pub trait OutputSink {
    fn record(&mut self, key: &str, value: &str) -> Result<(), ActionError>;
}

/// Appends `key=value` lines to an existing file, the way CI runners collect
/// step outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for FileSink {
    /// The file is never created or truncated. The handle lives only for this
    /// call and is closed on every return path.
    fn record(&mut self, key: &str, value: &str) -> Result<(), ActionError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| ActionError::OutputUnavailable {
                path: self.path.clone(),
                source,
            })?;
        debug!("Appending {} to {}", key, self.path.display());

        writeln!(file, "{key}={value}").map_err(|source| ActionError::WriteFailed {
            target: self.path.display().to_string(),
            source,
        })
    }
}

/// Prints the bare value, without its key.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn record(&mut self, _key: &str, value: &str) -> Result<(), ActionError> {
        writeln!(self.out, "{value}")
            .and_then(|()| self.out.flush())
            .map_err(|source| ActionError::WriteFailed {
                target: "stdout".into(),
                source,
            })
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    #[default]
    File,
    Console,
}

impl SinkKind {
    /// Unset or empty selects [`SinkKind::File`].
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ActionError> {
        sink_kind(env).parse()
    }

    /// Builds the sink for this kind. The file sink appends to the path in
    /// `GITHUB_OUTPUT`, taken as raw OS bytes. The console sink writes to
    /// `stdout`.
    pub fn open<'a>(
        self,
        env: &impl EnvSource,
        stdout: &'a mut impl Write,
    ) -> Box<dyn OutputSink + 'a> {
        match self {
            SinkKind::File => Box::new(FileSink::new(OUTPUT_PATH.read_os(env))),
            SinkKind::Console => Box::new(ConsoleSink::new(stdout)),
        }
    }
}

impl FromStr for SinkKind {
    type Err = ActionError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "file" => Ok(SinkKind::File),
            "console" => Ok(SinkKind::Console),
            _ => Err(ActionError::UnknownSink(kind.to_string())),
        }
    }
}
