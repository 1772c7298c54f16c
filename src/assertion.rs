use std::sync::Arc;

use crate::capture::CaptureStrategy;
use crate::error::MockError;
use crate::report::{global_reporter, Location, Reporter, Severity};
use crate::verify::{evaluate_chain, Cardinality, Validator};

/// Result of an evaluated [FunctionAssertion].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Verdict {
    passed: bool,
    message: String,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The rendered chain, followed by the reason it failed if it did.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A chain of expectations about the calls a mock has recorded.
///
/// Created by `check_called` or `require_called` on a mock. The recorded calls are copied when the
/// assertion is created, so calls made afterwards are not seen by it.
///
/// Links are added with the builder methods. The chain is evaluated by [FunctionAssertion::evaluate],
/// or otherwise when the assertion is dropped. A failing `require` assertion panics after reporting.
///
/// ```rust,ignore
/// mock.check_called().with((7, "bar")).exactly(9);
/// ```
pub struct FunctionAssertion<S: CaptureStrategy> {
    name: &'static str,
    strategy: S,
    history: Vec<S::Capture>,
    validators: Vec<Validator<S::Capture>>,
    location: Location,
    severity: Severity,
    reporter: Option<Arc<dyn Reporter>>,
    evaluated: bool,
}

impl<S: CaptureStrategy> FunctionAssertion<S> {
    pub(crate) fn new(
        name: &'static str,
        strategy: S,
        history: Vec<S::Capture>,
        location: Location,
        severity: Severity,
    ) -> Self {
        Self {
            name,
            strategy,
            history,
            validators: vec![],
            location,
            severity,
            reporter: None,
            evaluated: false,
        }
    }

    /// Only consider calls whose arguments equal `pattern`.
    pub fn with(mut self, pattern: S::Pattern) -> Self {
        let capture = self.strategy.capture_pattern(pattern);
        self.validators.push(Validator::Filter(capture));
        self
    }

    pub fn exactly(self, times: usize) -> Self {
        self.check(Cardinality::Exactly(times))
    }

    pub fn once(self) -> Self {
        self.check(Cardinality::Exactly(1))
    }

    pub fn at_least(self, times: usize) -> Self {
        self.check(Cardinality::AtLeast(times))
    }

    pub fn at_most(self, times: usize) -> Self {
        self.check(Cardinality::AtMost(times))
    }

    /// Between `min` and `max` calls, both inclusive.
    pub fn between(self, min: usize, max: usize) -> Self {
        self.check(Cardinality::AtLeast(min))
            .check(Cardinality::AtMost(max))
    }

    /// No calls may match. When that holds, later checks are skipped.
    pub fn never(self) -> Self {
        self.check(Cardinality::Never)
    }

    /// Report this assertion to `reporter` instead of the process-wide one.
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    fn check(mut self, cardinality: Cardinality) -> Self {
        self.validators.push(Validator::Check(cardinality));
        self
    }

    /// Evaluate and report the chain now.
    ///
    /// # Panics
    /// If the chain fails and the assertion was created by `require_called`.
    pub fn evaluate(mut self) -> Verdict {
        self.run()
    }

    fn run(&mut self) -> Verdict {
        self.evaluated = true;

        let reporter: &dyn Reporter = match &self.reporter {
            Some(reporter) => &**reporter,
            None => global_reporter(),
        };
        reporter.checkpoint(&self.location);

        let outcome = evaluate_chain::<S>(self.name, &self.history, &self.validators);
        if outcome.pass {
            reporter.report_success(&self.location, self.severity, &outcome.message);
        } else {
            reporter.report_failure(&self.location, self.severity, &outcome.message);

            if self.severity == Severity::Require {
                panic!(
                    "{}",
                    MockError::AssertionFailed {
                        location: self.location,
                        message: outcome.message,
                    }
                );
            }
        }

        Verdict {
            passed: outcome.pass,
            message: outcome.message,
        }
    }
}

impl<S: CaptureStrategy> Drop for FunctionAssertion<S> {
    fn drop(&mut self) {
        if self.evaluated || std::thread::panicking() {
            return;
        }
        self.run();
    }
}
