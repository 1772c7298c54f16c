//! Where assertion outcomes go.
//!
//! Every evaluated assertion is handed to a [Reporter]. Unless another one is installed with
//! [install_reporter], the process-wide reporter is a [StderrReporter].

use core::fmt;

use once_cell::sync::OnceCell;

/// Environment variable that makes the default reporter print passing assertions too.
pub const VERBOSE_ENV: &str = "CALLMOCK_VERBOSE";

/// Source location of an assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Enclosing function, when known.
    pub function: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: Some(function),
            file,
            line,
        }
    }

    /// The location of the caller, as tracked by `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            function: None,
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(function) => write!(f, "{function}@[{}:{}]", self.file, self.line),
            None => write!(f, "[{}:{}]", self.file, self.line),
        }
    }
}

/// What a failed assertion does after it has been reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Report, then carry on.
    Check,
    /// Report, then panic.
    Require,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => f.write_str("check"),
            Self::Require => f.write_str("require"),
        }
    }
}

/// Receives the outcome of assertions.
pub trait Reporter: Send + Sync {
    /// An assertion at `location` is about to be evaluated.
    ///
    /// Called once per assertion, when evaluation starts rather than when the chain is created,
    /// since a chain may still pick its reporter with [FunctionAssertion::reporter]. Always
    /// followed by `report_success` or `report_failure` for the same assertion.
    ///
    /// [FunctionAssertion::reporter]: crate::FunctionAssertion::reporter
    fn checkpoint(&self, _location: &Location) {}

    fn report_success(&self, location: &Location, severity: Severity, message: &str);

    fn report_failure(&self, location: &Location, severity: Severity, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for std::sync::Arc<R> {
    fn checkpoint(&self, location: &Location) {
        (**self).checkpoint(location)
    }

    fn report_success(&self, location: &Location, severity: Severity, message: &str) {
        (**self).report_success(location, severity, message)
    }

    fn report_failure(&self, location: &Location, severity: Severity, message: &str) {
        (**self).report_failure(location, severity, message)
    }
}

/// Prints failures to standard error, and successes as well when verbose.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrReporter {
    verbose: bool,
}

impl StderrReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Verbose when the `CALLMOCK_VERBOSE` environment variable is set, unless it is empty, `0` or
    /// `false`.
    pub fn from_env() -> Self {
        let verbose = std::env::var_os(VERBOSE_ENV)
            .map_or(false, |value| !matches!(value.to_str(), Some("" | "0" | "false")));
        Self { verbose }
    }
}

impl Reporter for StderrReporter {
    fn report_success(&self, location: &Location, severity: Severity, message: &str) {
        if self.verbose {
            eprintln!("callmock {severity} passed at {location}: {message}");
        }
    }

    fn report_failure(&self, location: &Location, severity: Severity, message: &str) {
        eprintln!("callmock {severity} failed at {location}: {message}");
    }
}

/// Forwards outcomes as [tracing] events.
///
/// Successes are logged at `DEBUG`, failures at `ERROR` and checkpoints at `TRACE`.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

#[cfg(feature = "tracing")]
impl Reporter for TracingReporter {
    fn checkpoint(&self, location: &Location) {
        tracing::trace!(
            file = location.file,
            line = location.line,
            function = location.function,
            "evaluating mock assertion"
        );
    }

    fn report_success(&self, location: &Location, severity: Severity, message: &str) {
        tracing::debug!(
            file = location.file,
            line = location.line,
            function = location.function,
            %severity,
            "{message}"
        );
    }

    fn report_failure(&self, location: &Location, severity: Severity, message: &str) {
        tracing::error!(
            file = location.file,
            line = location.line,
            function = location.function,
            %severity,
            "{message}"
        );
    }
}

static REPORTER: OnceCell<Box<dyn Reporter>> = OnceCell::new();

/// Install the process-wide reporter.
///
/// This can only happen once, and only before any assertion has used the default reporter. If a
/// reporter is already in place, the given one is handed back.
pub fn install_reporter<R: Reporter + 'static>(reporter: R) -> Result<(), Box<dyn Reporter>> {
    REPORTER.set(Box::new(reporter))
}

pub(crate) fn global_reporter() -> &'static dyn Reporter {
    &**REPORTER.get_or_init(|| Box::new(StderrReporter::from_env()))
}
