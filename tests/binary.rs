use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_action-output");

const ECHO_LINES: &str = "API Token: tok\nProject ID: proj\nBase Language: \n";
const RESULT_LINE: &str = "output_variable_name=some output value\n";

/// The binary with an empty environment, run from `dir` so no stray `.env`
/// is picked up.
fn step(dir: &Path) -> Command {
    let mut command = Command::new(BIN);
    command.env_clear().current_dir(dir);
    command
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

fn finish(command: &mut Command) -> (Option<i32>, String, String) {
    let Output { status, stdout, stderr } = command.output().unwrap();
    (status.code(), text(stdout), text(stderr))
}

#[test]
fn missing_input_prints_only_the_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("github_output");
    fs::write(&output, "").unwrap();

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K1", "")
            .env("K2", "p2")
            .env("GITHUB_OUTPUT", &output),
    );

    assert_eq!(code, Some(1));
    assert_eq!(stdout, "Missing required environment variables.\n");
    assert_eq!(stderr, "");
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn file_sink_succeeds_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("github_output");
    fs::write(&output, "").unwrap();

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K1", "tok")
            .env("K2", "proj")
            .env("K3", "")
            .env("GITHUB_OUTPUT", &output),
    );

    assert_eq!(code, Some(0));
    assert_eq!(stdout, ECHO_LINES);
    assert_eq!(stderr, "");
    assert_eq!(fs::read_to_string(&output).unwrap(), RESULT_LINE);
}

#[test]
fn open_failure_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("github_output");

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K1", "tok")
            .env("K2", "proj")
            .env("GITHUB_OUTPUT", &missing),
    );

    assert_eq!(code, Some(1));
    assert_eq!(stdout, ECHO_LINES);
    assert!(
        stderr.starts_with(&format!("Error opening {}: ", missing.display())),
        "{stderr}",
    );
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert_eq!(stderr.matches("Error opening").count(), 1);
    assert!(!missing.exists());
}

#[test]
fn console_sink_prints_result_last() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K1", "tok")
            .env("K2", "proj")
            .env("K3", "en")
            .env("ACTION_OUTPUT_SINK", "console"),
    );

    assert_eq!(code, Some(0));
    assert_eq!(
        stdout,
        "API Token: tok\nProject ID: proj\nBase Language: en\nsome output value\n",
    );
    assert_eq!(stderr, "");
}

#[test]
fn dot_env_fills_unset_inputs_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "K1=from_file\nK2=proj\n").unwrap();

    let (code, stdout, _) = finish(
        step(dir.path())
            .env("K1", "tok")
            .env("ACTION_OUTPUT_SINK", "console"),
    );

    assert_eq!(code, Some(0));
    assert_eq!(stdout, format!("{ECHO_LINES}some output value\n"));
}

#[test]
fn outcomes_reach_the_log_file_not_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("action.log");

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K2", "p2")
            .env("ACTION_OUTPUT_LOG_FILE", &log_file),
    );

    assert_eq!(code, Some(1));
    assert_eq!(stdout, "Missing required environment variables.\n");
    assert_eq!(stderr, "");

    let logged = fs::read_to_string(&log_file).unwrap();
    assert!(logged.lines().next().unwrap().contains("Logging started at"));
    assert!(logged.contains("INFO - Missing required variables: K1"), "{logged}");
}

#[cfg(target_os = "linux")]
#[test]
fn non_unicode_output_path_is_used_as_is() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join(OsStr::from_bytes(b"github_output_\xff"));
    fs::write(&output, "").unwrap();

    let (code, stdout, stderr) = finish(
        step(dir.path())
            .env("K1", "tok")
            .env("K2", "proj")
            .env("GITHUB_OUTPUT", &output),
    );

    assert_eq!(code, Some(0), "{stderr}");
    assert_eq!(stdout, ECHO_LINES);
    assert_eq!(fs::read_to_string(&output).unwrap(), RESULT_LINE);
}
