//! The links of an assertion chain and how a chain is evaluated over recorded calls.

use core::fmt::{self, Display, Write};

use crate::capture::{display_capture, CaptureStrategy};
use crate::mismatch::Mismatch;

/// A bound on how many calls may match.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Cardinality {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    /// No calls may match. Ends evaluation of the chain when it holds.
    Never,
}

impl Cardinality {
    pub fn validate(&self, matched: usize) -> ValidationResult {
        let actual = NCalls(matched);
        let (pass, expected) = match *self {
            Self::Exactly(n) => (matched == n, format!("exactly {}", NCalls(n))),
            Self::AtLeast(n) => (matched >= n, format!("at least {}", NCalls(n))),
            Self::AtMost(n) => (matched <= n, format!("at most {}", NCalls(n))),
            Self::Never => (matched == 0, NCalls(0).to_string()),
        };

        ValidationResult {
            pass,
            short_circuit: pass && *self == Self::Never,
            message: if pass {
                String::new()
            } else {
                format!("expected {expected}, but {actual} matched")
            },
        }
    }
}

impl Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, ".exactly({n})"),
            Self::AtLeast(n) => write!(f, ".at_least({n})"),
            Self::AtMost(n) => write!(f, ".at_most({n})"),
            Self::Never => write!(f, ".never()"),
        }
    }
}

/// Outcome of one check.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct ValidationResult {
    pub pass: bool,
    /// Stop evaluating further links.
    pub short_circuit: bool,
    pub message: String,
}

/// One link of an assertion chain.
pub(crate) enum Validator<C> {
    /// Keep only the calls equal to the pattern.
    Filter(C),
    Check(Cardinality),
}

/// Outcome of a whole chain.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct ChainOutcome {
    pub pass: bool,
    pub message: String,
}

/// Evaluate `validators` over `history`.
///
/// Every filter narrows the recorded calls before any check runs. Filters are applied in reverse
/// registration order, which gives the same result as any other order since each one only removes
/// calls. Checks then run in registration order until one fails or ends the chain.
pub(crate) fn evaluate_chain<S: CaptureStrategy>(
    name: &str,
    history: &[S::Capture],
    validators: &[Validator<S::Capture>],
) -> ChainOutcome {
    let mut trace = format!("{name}: check_called()");
    for validator in validators {
        match validator {
            Validator::Filter(pattern) => {
                let _ = write!(trace, ".with({})", display_capture::<S>(pattern));
            }
            Validator::Check(cardinality) => {
                let _ = write!(trace, "{cardinality}");
            }
        }
    }

    let mut matched: Vec<&S::Capture> = history.iter().collect();
    for validator in validators.iter().rev() {
        if let Validator::Filter(pattern) = validator {
            matched.retain(|capture| S::equals(pattern, capture));
        }
    }

    for validator in validators {
        let Validator::Check(cardinality) = validator else {
            continue;
        };

        let result = cardinality.validate(matched.len());
        if !result.pass {
            let mut message = format!("{trace}: {}", result.message);

            let last_filter = validators.iter().rev().find_map(|validator| match validator {
                Validator::Filter(pattern) => Some(pattern),
                Validator::Check(_) => None,
            });
            if let (Some(pattern), true) = (last_filter, matched.is_empty()) {
                let _ = write!(message, "{}", Mismatch::new::<S>(pattern, history));
            }

            return ChainOutcome {
                pass: false,
                message,
            };
        }
        if result.short_circuit {
            break;
        }
    }

    ChainOutcome {
        pass: true,
        message: trace,
    }
}

/// Display helper for a number of calls.
pub(crate) struct NCalls(pub usize);

impl Display for NCalls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "no calls"),
            1 => write!(f, "1 call"),
            _ => write!(f, "{} calls", self.0),
        }
    }
}
