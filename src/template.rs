use crate::capture::{AnyCapture, UnknownArguments};
use crate::error::MockError;
use crate::recorder::Recorder;

/// A mock of a function whose argument list may differ from call to call, returning `R`.
///
/// This is what generic functions are mocked with: every instantiation records into the same mock.
/// Arguments are captured with the [capture!](crate::capture) macro, which needs their types to be
/// `'static`:
///
/// ```rust,ignore
/// let f = MockTemplateFunction::<i32>::new();
/// f.when(capture!(7_i32, "bar")).returns(1);
/// assert_eq!(1, call!(f, 7_i32, "bar"));
/// ```
///
/// A recorded call only ever equals a pattern of the same length and argument types.
pub type MockTemplateFunction<R> = Recorder<UnknownArguments, R>;

/// Name of a template mock that was not given one.
pub const DEFAULT_TEMPLATE_NAME: &str = "mock_template_function";

impl<R: 'static> Recorder<UnknownArguments, R> {
    pub fn new() -> Self {
        Self::from_strategy(DEFAULT_TEMPLATE_NAME, UnknownArguments)
    }

    /// Record a call and return its configured answer.
    ///
    /// # Panics
    /// If no answer applies and `R` is not `()`, or if the answer was configured with `panics`.
    #[track_caller]
    pub fn call(&self, args: AnyCapture) -> R {
        match self.try_call(args) {
            Ok(output) => output,
            Err(error) => panic!("{error}"),
        }
    }

    /// Record a call and return its configured answer, or why there is none.
    pub fn try_call(&self, args: AnyCapture) -> Result<R, MockError> {
        self.invoke(args)
    }
}

impl<R: 'static> Default for Recorder<UnknownArguments, R> {
    fn default() -> Self {
        Self::new()
    }
}
