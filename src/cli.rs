//! Command-line front end for the `levlog` binary.
//!
//! `levlog` emits a single message through a configured logger:
//!
//! ```text
//! levlog [--level LEVEL] [--name NAME] [--output DEST] [--raw] <SEVERITY> <TEMPLATE> [ARGS...]
//! ```
//!
//! Defaults for `--level` and `--output` come from `LEVLOG_LEVEL` and
//! `LEVLOG_DESTINATION`. Each trailing argument is typed by its literal
//! form: integers, then floats, then `true`/`false`, otherwise a string.
//!
//! | Status | Meaning |
//! |---|---|
//! | 0 | message emitted or filtered out |
//! | 1 | sink failure, or a `fatal` message was emitted |
//! | 2 | usage or configuration error |

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Arg as ClapArg, ArgAction, ArgMatches, Command};
use logging::{Arg, ConfigError, Destination, LeveledLog, Logger, LoggerConfig};
use logging_sink::{Severity, SinkError};

/// Program name used in help output and diagnostics.
pub const PROGRAM_NAME: &str = "levlog";

/// Exit status for usage and configuration errors.
pub const USAGE_EXIT_CODE: u8 = 2;

/// Exit status when the sink rejects the message.
pub const SINK_FAILURE_EXIT_CODE: u8 = 1;

/// Builds the `clap` command used for parsing.
pub fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Emit one leveled log message through a configured sink.")
        .allow_negative_numbers(true)
        .arg(
            ClapArg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Minimum severity to emit (trace, debug, info, warning, error, fatal).")
                .value_parser(parse_severity),
        )
        .arg(
            ClapArg::new("name")
                .long("name")
                .short('n')
                .value_name("NAME")
                .help("Prefix the message with NAME, as a named child logger does."),
        )
        .arg(
            ClapArg::new("output")
                .long("output")
                .short('o')
                .value_name("DEST")
                .help("Destination: stdout, stderr, null, file:<path> or syslog[:<facility>].")
                .value_parser(parse_destination),
        )
        .arg(
            ClapArg::new("raw")
                .long("raw")
                .help("Write the rendered message without a level label, ignoring the threshold.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            ClapArg::new("severity")
                .value_name("SEVERITY")
                .help("Severity of the message.")
                .required(true)
                .value_parser(parse_severity),
        )
        .arg(
            ClapArg::new("template")
                .value_name("TEMPLATE")
                .help("printf-style template, e.g. \"x=%d\".")
                .required(true),
        )
        .arg(
            ClapArg::new("args")
                .value_name("ARGS")
                .help("Positional template arguments.")
                .num_args(0..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true),
        )
}

fn parse_severity(value: &str) -> Result<Severity, logging_sink::SeverityParseError> {
    value.parse()
}

fn parse_destination(value: &str) -> Result<Destination, ConfigError> {
    value.parse()
}

/// Types a command-line argument by its literal form.
///
/// # Examples
///
/// ```
/// use leveled_log::{Arg, cli::typed_arg};
///
/// assert!(matches!(typed_arg("-5"), Arg::Int(-5)));
/// assert!(matches!(typed_arg("2.5"), Arg::Float(_)));
/// assert!(matches!(typed_arg("true"), Arg::Bool(true)));
/// assert!(matches!(typed_arg("nan"), Arg::Str(_)));
/// ```
pub fn typed_arg(raw: &str) -> Arg<'_> {
    if let Ok(value) = raw.parse::<i64>() {
        return Arg::Int(value);
    }
    if let Ok(value) = raw.parse::<u64>() {
        return Arg::Uint(value);
    }
    if let Ok(value) = raw.parse::<f64>()
        && value.is_finite()
    {
        return Arg::Float(value);
    }
    match raw {
        "true" => Arg::Bool(true),
        "false" => Arg::Bool(false),
        _ => Arg::from(raw),
    }
}

/// Parsed invocation.
struct Invocation {
    config: LoggerConfig,
    name: Option<String>,
    raw: bool,
    severity: Severity,
    template: String,
    args: Vec<String>,
}

impl Invocation {
    fn from_matches(matches: &ArgMatches, mut config: LoggerConfig) -> Self {
        if let Some(level) = matches.get_one::<Severity>("level") {
            config.level = *level;
        }
        if let Some(destination) = matches.get_one::<Destination>("output") {
            config.destination = destination.clone();
        }

        Self {
            config,
            name: matches.get_one::<String>("name").cloned(),
            raw: matches.get_flag("raw"),
            severity: matches
                .get_one::<Severity>("severity")
                .copied()
                .unwrap_or_default(),
            template: matches
                .get_one::<String>("template")
                .cloned()
                .unwrap_or_default(),
            args: matches
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }

    fn emit(&self, target: &dyn LeveledLog) -> Result<(), SinkError> {
        let args: Vec<Arg<'_>> = self.args.iter().map(|raw| typed_arg(raw)).collect();

        if self.raw {
            return target.print(&logging::template::render(&self.template, &args));
        }
        if self.severity == Severity::Fatal {
            target.fatal(&self.template, &args);
        }
        target.log(self.severity, &self.template, &args)
    }
}

/// Runs `levlog` with `args` (including the program name).
///
/// Help and version output go to `stdout`; diagnostics go to `stderr`. The
/// message itself goes to the configured destination. A `fatal` severity
/// ends the process with status 1 after the message is written.
pub fn run<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    run_with_env(args, stdout, stderr, LoggerConfig::from_env)
}

/// Like [`run`], with the environment-derived defaults supplied by `defaults`.
pub fn run_with_env<I, Out, Err, F>(
    args: I,
    stdout: &mut Out,
    stderr: &mut Err,
    defaults: F,
) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
    F: FnOnce() -> Result<LoggerConfig, ConfigError>,
{
    let matches = match clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render();
            return if error.use_stderr() {
                let _ = write!(stderr, "{rendered}");
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                let _ = write!(stdout, "{rendered}");
                ExitCode::SUCCESS
            };
        }
    };

    let config = match defaults() {
        Ok(config) => config,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    let invocation = Invocation::from_matches(&matches, config);

    let logger = match invocation.config.build() {
        Ok(logger) => Arc::new(logger),
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            return ExitCode::from(SINK_FAILURE_EXIT_CODE);
        }
    };

    let result = match &invocation.name {
        Some(name) => invocation.emit(&Logger::named(&logger, name.as_str())),
        None => invocation.emit(&*logger),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            ExitCode::from(SINK_FAILURE_EXIT_CODE)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn run_default<const N: usize>(args: [&str; N]) -> (ExitCode, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_with_env(args, &mut stdout, &mut stderr, || Ok(LoggerConfig::default()));
        (
            status,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn typed_arg_prefers_integers() {
        assert!(matches!(typed_arg("42"), Arg::Int(42)));
        assert!(matches!(typed_arg("18446744073709551615"), Arg::Uint(u64::MAX)));
        assert!(matches!(typed_arg("1e3"), Arg::Float(v) if (v - 1000.0).abs() < f64::EPSILON));
        assert!(matches!(typed_arg("false"), Arg::Bool(false)));
        assert!(matches!(typed_arg("True"), Arg::Str(_)));
        assert!(matches!(typed_arg("inf"), Arg::Str(_)));
    }

    #[test]
    fn help_goes_to_stdout() {
        let (status, stdout, stderr) = run_default(["levlog", "--help"]);
        assert_eq!(status, ExitCode::SUCCESS);
        assert!(stdout.contains("Usage"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn missing_template_is_usage_error() {
        let (status, stdout, stderr) = run_default(["levlog", "info"]);
        assert_eq!(status, ExitCode::from(USAGE_EXIT_CODE));
        assert!(stdout.is_empty());
        assert!(stderr.contains("TEMPLATE"));
    }

    #[test]
    fn unknown_severity_is_usage_error() {
        let (status, _, stderr) = run_default(["levlog", "loud", "msg"]);
        assert_eq!(status, ExitCode::from(USAGE_EXIT_CODE));
        assert!(stderr.contains("loud"));
    }

    #[test]
    fn bad_environment_is_usage_error() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_with_env(["levlog", "info", "m"], &mut stdout, &mut stderr, || {
            LoggerConfig::from_lookup(|_| Some("nonsense".to_owned()))
        });

        assert_eq!(status, ExitCode::from(USAGE_EXIT_CODE));
        assert!(String::from_utf8(stderr).unwrap().starts_with("levlog: "));
    }

    #[test]
    fn writes_rendered_message_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let output = format!("file:{}", path.display());

        let (status, _, stderr) = run_default([
            "levlog", "--output", output.as_str(), "--name", "job", "error", "x=%d y=%s", "5", "-",
        ]);

        assert_eq!(status, ExitCode::SUCCESS, "{stderr}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "ERR | job: x=5 y=-\n");
    }

    #[test]
    fn below_threshold_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let output = format!("file:{}", path.display());

        let (status, _, _) =
            run_default(["levlog", "-o", output.as_str(), "--level", "error", "warning", "quiet"]);

        assert_eq!(status, ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn raw_ignores_threshold_and_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let output = format!("file:{}", path.display());

        let (status, _, _) = run_default([
            "levlog", "-o", output.as_str(), "-l", "fatal", "--raw", "debug", "%d%%", "-7",
        ]);

        assert_eq!(status, ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&path).unwrap(), "-7%\n");
    }

    #[test]
    fn unopenable_destination_is_sink_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = format!("file:{}", dir.path().join("no/such/dir.log").display());

        let (status, _, stderr) = run_default(["levlog", "-o", output.as_str(), "info", "m"]);

        assert_eq!(status, ExitCode::from(SINK_FAILURE_EXIT_CODE));
        assert!(stderr.contains("failed to open log file"));
    }
}
