pub mod env;
pub mod error;
pub mod inputs;
pub mod sink;
mod run;

pub use error::ActionError;
pub use inputs::ActionInputs;
pub use run::{run, EXIT_FAILURE, EXIT_SUCCESS, MISSING_INPUTS_MESSAGE, OUTPUT_KEY, OUTPUT_VALUE};
pub use sink::{ConsoleSink, FileSink, OutputSink, SinkKind};

#[allow(unused_macros, unused_imports)]
pub mod logging {
    use action_output_logging::with_target;
    with_target! { "action-output" }
}
