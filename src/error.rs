use core::fmt;

use crate::report::Location;

pub(crate) type MockResult<T> = Result<T, MockError>;

/// An error produced by a mock.
///
/// Calling a mock through `call` turns these into panics; `try_call` hands them back.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MockError {
    /// The mock was called, but neither a default answer nor a matching conditional answer exists,
    /// and the return type has no natural "nothing" value.
    #[error("{call}: No return value configured. Configure one with `returns`, `action`, `panics` or `when` before the first call.")]
    NoReturnConfigured { call: FnCall },
    /// The answer selected for the call was configured with `panics`.
    #[error("{call}: Explicit panic: {message}")]
    ExplicitPanic { call: FnCall, message: String },
    /// A `require`d assertion did not hold.
    #[error("{location}: Assertion failed: {message}")]
    AssertionFailed { location: Location, message: String },
}

/// A rendered call: the mock's name followed by its argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnCall {
    pub name: &'static str,
    pub inputs_debug: String,
}

impl fmt::Display for FnCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.inputs_debug)
    }
}
