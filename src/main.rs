use action_output_env::ProcessEnv;
use action_output_logging::{set_up_logging, with_log_file, DEFAULT_LOGGING_TARGETS};
use action_output_main::env::log_file;
use action_output_main::{logging, run};

use dotenvy::dotenv;

use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenv().ok(); // load env vars

    let log_file = PathBuf::from(log_file(&ProcessEnv));
    let logging_set_up = if log_file.as_os_str().is_empty() {
        set_up_logging(&DEFAULT_LOGGING_TARGETS, logging::DEFAULT_TARGET_NAME)
    } else {
        set_up_logging(
            &with_log_file(&DEFAULT_LOGGING_TARGETS, &log_file),
            logging::DEFAULT_TARGET_NAME,
        )
    };
    // Diagnostics are optional, the step still runs without them.
    if let Err(error) = logging_set_up {
        eprintln!("Failed to set up logging: {error}");
    }

    let status = run(&ProcessEnv, &mut stdout().lock(), &mut stderr().lock());
    log::logger().flush();

    ExitCode::from(status)
}
