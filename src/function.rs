use crate::capture::{Arguments, ComparableArguments, KnownArguments};
use crate::error::MockError;
use crate::recorder::Recorder;

/// A mock of a function taking the arguments `A` and returning `R`.
///
/// `A` is a tuple of the argument types, so `MockFunction<(i32, String), bool>` mocks
/// `fn(i32, String) -> bool`. Calls pass a tuple of references to the arguments:
///
/// ```rust,ignore
/// let f = MockFunction::<(i32, String), bool>::new();
/// f.returns(true);
/// assert!(f.call((&1, &"one".to_string())));
/// ```
///
/// [MockFunction::new] needs every argument type to be `Clone + PartialEq + Debug`. For any other
/// argument type, create the mock with the [mock_function!](crate::mock_function) macro, which
/// captures what it can.
pub type MockFunction<A, R> = Recorder<KnownArguments<A>, R>;

/// Name of a mock that was not given one.
pub const DEFAULT_NAME: &str = "mock_function";

impl<A: Arguments, R: 'static> Recorder<KnownArguments<A>, R> {
    /// Create a mock for argument types that can all be copied, compared and printed.
    pub fn new() -> Self
    where
        A: ComparableArguments,
    {
        Self::with_caps(A::full_caps())
    }

    /// Create a mock with the given per-argument capabilities.
    pub fn with_caps(caps: A::Caps) -> Self {
        Self::from_strategy(DEFAULT_NAME, KnownArguments::new(caps))
    }

    /// Record a call and return its configured answer.
    ///
    /// # Panics
    /// If no answer applies and `R` is not `()`, or if the answer was configured with `panics`.
    #[track_caller]
    pub fn call(&self, args: A::Refs<'_>) -> R {
        match self.try_call(args) {
            Ok(output) => output,
            Err(error) => panic!("{error}"),
        }
    }

    /// Record a call and return its configured answer, or why there is none.
    pub fn try_call(&self, args: A::Refs<'_>) -> Result<R, MockError> {
        let capture = A::capture_refs(args, &self.strategy().caps);
        self.invoke(capture)
    }
}

impl<A: ComparableArguments, R: 'static> Default for Recorder<KnownArguments<A>, R> {
    fn default() -> Self {
        Self::new()
    }
}
