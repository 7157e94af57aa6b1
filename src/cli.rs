//! Command-line surface: `soil-watcher [-d]`.
//!
//! `-h`/`--help`, any other flag, or a positional argument is a usage
//! error; the caller prints [`USAGE`] and exits with status 1.

use argh::{EarlyExit, FromArgs};

pub const PROGRAM: &str = "soil-watcher";

pub const USAGE: &str = "Usage: soil-watcher [-d]\n    -d Daemonize the program\n";

#[derive(FromArgs, Debug, PartialEq, Eq)]
/// Soil moisture watcher.
pub struct Args {
    /// daemonize the program
    #[argh(switch, short = 'd')]
    pub daemonize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Stay on the controlling terminal with console output.
    Attached,
    /// Detach from the terminal after setup.
    Detached,
}

impl From<&Args> for RunMode {
    fn from(args: &Args) -> Self {
        if args.daemonize {
            Self::Detached
        } else {
            Self::Attached
        }
    }
}

/// Parsing stopped early: help was requested or the arguments were bad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    /// `-h`/`--help` rather than a parse failure.
    pub help: bool,
    /// argh's explanation (help text or the offending argument).
    pub message: String,
}

impl From<EarlyExit> for UsageError {
    fn from(exit: EarlyExit) -> Self {
        Self {
            help: exit.status.is_ok(),
            message: exit.output,
        }
    }
}

/// Parse the arguments after the program name.
pub fn parse_args<I, S>(args: I) -> Result<RunMode, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let owned: Vec<S> = args.into_iter().collect();
    let strs: Vec<&str> = owned.iter().map(AsRef::as_ref).collect();
    let args = Args::from_args(&[PROGRAM], &strs)?;
    Ok(RunMode::from(&args))
}
