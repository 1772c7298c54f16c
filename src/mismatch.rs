use core::fmt::{self, Display};

use crate::capture::{display_capture, CaptureStrategy};

/// Recorded calls beyond this many are summarized instead of listed.
const MAX_LISTED_CALLS: usize = 16;

/// Explains why no recorded call matched a `with` pattern: lists what was recorded and compares the
/// pattern with the most recent call.
pub(crate) struct Mismatch {
    expected: String,
    recorded: Vec<String>,
}

impl Mismatch {
    pub fn new<S: CaptureStrategy>(expected: &S::Capture, history: &[S::Capture]) -> Self {
        Self {
            expected: display_capture::<S>(expected),
            recorded: history.iter().map(display_capture::<S>).collect(),
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(last) = self.recorded.last() else {
            return Ok(());
        };

        writeln!(f)?;
        writeln!(f, "Recorded calls:")?;
        for (index, call) in self.recorded.iter().enumerate().take(MAX_LISTED_CALLS) {
            writeln!(f, "  #{index} {call}")?;
        }
        if self.recorded.len() > MAX_LISTED_CALLS {
            writeln!(
                f,
                "  ... and {} more",
                self.recorded.len() - MAX_LISTED_CALLS
            )?;
        }

        if *last == self.expected {
            return write!(
                f,
                "The most recent call prints like the pattern but is not equal to it. Arguments that \
                 can't be copied or compared never equal a value."
            );
        }

        writeln!(f, "Most recent call compared with the pattern (actual / expected):")?;
        Diff::new(last, &self.expected).fmt(f)
    }
}

struct Diff<'s> {
    actual: &'s str,
    expected: &'s str,
}

impl<'s> Diff<'s> {
    fn new(actual: &'s impl AsRef<str>, expected: &'s impl AsRef<str>) -> Self {
        Self {
            actual: actual.as_ref(),
            expected: expected.as_ref(),
        }
    }
}

impl<'s> Display for Diff<'s> {
    #[cfg(feature = "pretty-print")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = pretty_assertions::StrComparison::new(self.actual, self.expected);
        write!(f, "{comparison}")
    }

    #[cfg(not(feature = "pretty-print"))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  actual: {}", self.actual)?;
        write!(f, "expected: {}", self.expected)
    }
}
