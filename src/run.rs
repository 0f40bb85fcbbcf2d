use std::io::Write;

use action_output_env::EnvSource;

use crate::error::ActionError;
use crate::inputs::ActionInputs;
use crate::logging::{error, info};
use crate::sink::SinkKind;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub const MISSING_INPUTS_MESSAGE: &str = "Missing required environment variables.";

pub const OUTPUT_KEY: &str = "output_variable_name";
/// Placeholder result, independent of the inputs.
pub const OUTPUT_VALUE: &str = "some output value";

/// Runs one step against `env` and returns the process exit status.
///
/// Validation comes first: if a required input is missing, only
/// [`MISSING_INPUTS_MESSAGE`] is printed and nothing is recorded. The binary
/// loads `.env` into the process environment before calling this, so a `.env`
/// in the working directory can supply `K1`/`K2` when they are unset.
/// Otherwise the inputs are echoed to `stdout` and the result goes to the sink
/// picked by `ACTION_OUTPUT_SINK`. Sink and write failures are reported on
/// `stderr`, once.
///
/// Outcomes are logged at `info`/`debug` only. Stdout and stderr stay exactly
/// as described above with the default log targets.
pub fn run(env: &impl EnvSource, stdout: &mut impl Write, stderr: &mut impl Write) -> u8 {
    match record_output(env, stdout) {
        Ok(()) => {
            info!("Recorded {}", OUTPUT_KEY);
            EXIT_SUCCESS
        }
        Err(failure) => {
            let reported = match &failure {
                ActionError::MissingInputs(missing) => {
                    info!("Missing required variables: {}", missing);
                    writeln!(stdout, "{MISSING_INPUTS_MESSAGE}")
                }
                _ => {
                    info!("Step failed: {}", failure);
                    writeln!(stderr, "{failure}")
                }
            };
            if let Err(write_error) = reported {
                error!("Failed to report \"{}\": {}", failure, write_error);
            }
            failure.exit_code()
        }
    }
}

fn record_output(env: &impl EnvSource, stdout: &mut impl Write) -> Result<(), ActionError> {
    let inputs = ActionInputs::from_env(env)?;
    let kind = SinkKind::from_env(env)?;

    inputs.report(stdout).map_err(|source| ActionError::WriteFailed {
        target: "stdout".into(),
        source,
    })?;

    kind.open(env, stdout).record(OUTPUT_KEY, OUTPUT_VALUE)
}
