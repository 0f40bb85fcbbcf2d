use lazy_init::Lazy;
use lazy_static::lazy_static;

use action_output_shared_structs::*;
use action_output_shared_structs::shortcuts::other_io_error;
use std::collections::HashMap;
use smallvec::{SmallVec, smallvec};

use log::{LevelFilter, Metadata, Record};

use std::fmt::{Display, Formatter};
use std::sync::{RwLock, Arc};
use chrono::{DateTime, Utc};


use std::io::{stderr, stdout, Write};
use std::fs::{File, OpenOptions};
use std::path::Path;


pub(crate) use std::io::Result as IOResult;

#[doc(hidden)]
pub mod __internal_redirects {
    pub use log::{trace, debug, info, warn, error};
}
pub use log::Level;
pub use action_output_logging_proc_macro::with_target;


const TIME_FORMAT: &str = "%b %d %H:%M:%S%.3f";


pub type LogLocationTargetMap<'a> = HashMap<Level, SmallVec<[LogLocationTarget<'a>; 6]>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLocationTarget<'a> {
    StdOut,
    StdErr,
    File(&'a Path),
}

impl<'b> LogLocationTarget<'b> {
    fn shorten<'a>(self) -> LogLocationTarget<'a> where 'b: 'a {
        match self {
            LogLocationTarget::StdOut => LogLocationTarget::StdOut,
            LogLocationTarget::StdErr => LogLocationTarget::StdErr,
            LogLocationTarget::File(path) => LogLocationTarget::File(path),
        }
    }
}

#[derive(Clone, Debug)]
enum WritableLogLocationTarget {
    StdOut,
    StdErr,
    File(Arc<RwLock<File>>),
}

impl WritableLogLocationTarget {
    fn write_line(&self, line: &str) -> IOResult<()> {
        match self {
            WritableLogLocationTarget::StdOut => writeln!(stdout().lock(), "{line}"),
            WritableLogLocationTarget::StdErr => writeln!(stderr().lock(), "{line}"),
            WritableLogLocationTarget::File(file) => {
                let mut file = file
                    .write()
                    .map_err(|error| other_io_error(PoisonErrorWrapper::from(error)))?;
                writeln!(file, "{line}")
            }
        }
    }

    fn flush(&self) -> IOResult<()> {
        match self {
            WritableLogLocationTarget::StdOut => stdout().flush(),
            WritableLogLocationTarget::StdErr => stderr().flush(),
            WritableLogLocationTarget::File(file) => file
                .write()
                .map_err(|error| other_io_error(PoisonErrorWrapper::from(error)))?
                .flush(),
        }
    }
}

#[derive(Debug, Default)]
pub struct WritableLogLocationTargetMap(HashMap<Level, SmallVec<[WritableLogLocationTarget; 6]>>);

impl WritableLogLocationTargetMap {
    #[cfg(test)]
    fn target_count(&self, level: Level) -> usize {
        self.0.get(&level).map_or(0, SmallVec::len)
    }

    fn write_line(&self, level: Level, line: &str) {
        for target in self.0.get(&level).into_iter().flatten() {
            if let Err(error) = target.write_line(line) {
                eprintln!("Failed to log to {:?}! Error: {:?}", target, error);
            }
        }
    }
}

impl Display for WritableLogLocationTargetMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:#?}", self))
    }
}

/// Renders one log line:
/// `<time> | <module>; <file>:<line>; <LEVEL> - <message>`.
/// Parts the record doesn't carry are left out.
pub fn format_record(time: DateTime<Utc>, record: &Record) -> String {
    let mut line = format!("{} | ", time.format(TIME_FORMAT));

    if let Some(module) = record.module_path() {
        line.push_str(module);
        line.push_str("; ");
    }
    if let Some(file) = record.file() {
        line.push_str(file);
        if let Some(number) = record.line() {
            line.push_str(&format!(":{number}"));
        }
        line.push_str("; ");
    }
    line.push_str(&format!("{} - {}", record.level(), record.args()));
    line
}

struct FileLogger {
    targets: RwLock<WritableLogLocationTargetMap>,
    name: Lazy<&'static str>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Some(&metadata.target()) == self.name.get()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) { return; }
        let target_map = match self.targets.read() {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Logging target poisoned! {}", e);
                return;
            }
        };

        target_map.write_line(record.level(), &format_record(Utc::now(), record));
    }

    fn flush(&self) {
        let Ok(target_map) = self.targets.read() else { return };
        target_map.0
            .values()
            .flatten()
            .filter_map(|target| target.flush().err())
            .for_each(|error| eprintln!("Failed to flush log target! Error: {:?}", error));
    }
}

lazy_static! {
    static ref LOGGER: FileLogger = FileLogger {
        targets: RwLock::default(),
        name: Lazy::new(),
    };
}

/// Installs the process-wide logger. Only records logged under `name` are
/// kept; see `with_target!`.
pub fn set_up_logging(input: &LogLocationTargetMap, name: &'static str) -> IOResult<()> {
    LOGGER.name.get_or_create(|| name);

    let mut target_hashmap = LOGGER
        .targets
        .write()
        .map_err(|error| other_io_error(PoisonErrorWrapper::from(error)))?;

    *target_hashmap = generate_writable_log_location_target_map(input, Utc::now());

    log::set_logger(&*LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Trace))
        .map_err(|error| other_io_error(ErrorWrapper::from(error)))
}

fn open_log_file(path: &Path, time_startup: DateTime<Utc>) -> IOResult<File> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(
        file,
        "{:-^50}",
        format!("Logging started at {}", time_startup.format(TIME_FORMAT)),
    )?;
    Ok(file)
}

/// Opens every file target once, shared between levels. A file that can't be
/// opened is reported on stderr and dropped from every level that names it.
pub fn generate_writable_log_location_target_map(
    from: &LogLocationTargetMap,
    time_startup: DateTime<Utc>,
) -> WritableLogLocationTargetMap {
    let mut file_map: HashMap<&Path, Option<Arc<RwLock<File>>>> = HashMap::new();

    WritableLogLocationTargetMap(
        from.iter()
            .map(|(level, targets)| {
                let writable: SmallVec<[WritableLogLocationTarget; 6]> = targets
                    .iter()
                    .filter_map(|target| match target {
                        LogLocationTarget::StdOut => Some(WritableLogLocationTarget::StdOut),
                        LogLocationTarget::StdErr => Some(WritableLogLocationTarget::StdErr),
                        LogLocationTarget::File(path) => file_map
                            .entry(*path)
                            .or_insert_with(|| match open_log_file(path, time_startup) {
                                Ok(file) => Some(Arc::new(RwLock::new(file))),
                                Err(error) => {
                                    eprintln!("Failed to open log file {}: {}", path.display(), error);
                                    None
                                }
                            })
                            .clone()
                            .map(WritableLogLocationTarget::File),
                    })
                    .collect();
                (*level, writable)
            })
            .collect(),
    )
}

/// Copy of `base` where every level also writes to `path`.
pub fn with_log_file<'a, 'b: 'a>(
    base: &LogLocationTargetMap<'b>,
    path: &'a Path,
) -> LogLocationTargetMap<'a> {
    use Level::*;

    [Trace, Debug, Info, Warn, Error]
        .into_iter()
        .map(|level| {
            let mut targets: SmallVec<[LogLocationTarget<'a>; 6]> = base
                .get(&level)
                .into_iter()
                .flatten()
                .map(|target| target.shorten())
                .collect();
            if !targets.contains(&LogLocationTarget::File(path)) {
                targets.push(LogLocationTarget::File(path));
            }
            (level, targets)
        })
        .collect()
}


lazy_static! {
    /// Stdout belongs to the step's own output, so nothing logs there by
    /// default. Warnings and errors go to stderr.
    pub static ref DEFAULT_LOGGING_TARGETS: LogLocationTargetMap<'static> = {
        use Level::*;
        use LogLocationTarget::*;
        vec![
            (Warn, smallvec![
                StdErr,
            ]),
            (Error, smallvec![
                StdErr,
            ]),
        ].into_iter().collect()
    };
}
