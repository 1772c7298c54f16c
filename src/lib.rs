//! `callmock` records the calls made to mocked functions, lets tests decide what those calls return,
//! and asserts afterwards how the functions were called.
//!
//! # Mocking a function
//!
//! A [MockFunction] mocks one function with declared argument types. It records a copy of the
//! arguments of every call, and answers each call with a configured value:
//!
//! ```rust
//! use callmock::*;
//!
//! let lookup = MockFunction::<(i32, String), bool>::new();
//! lookup.returns(false);
//! lookup.when((7, "bar".to_string())).returns(true);
//!
//! assert!(!lookup.call((&1, &"foo".to_string())));
//! assert!(lookup.call((&7, &"bar".to_string())));
//!
//! lookup.require_called().with((7, "bar".to_string())).once();
//! ```
//!
//! Argument types do not need to implement anything. Use [mock_function!] to create the mock, and
//! arguments that can't be copied are recorded as placeholders, arguments that can't be compared never
//! match a pattern, and arguments that can't be printed show up as `?` in messages.
//!
//! # Mocking a trait
//!
//! The [mock] attribute generates a struct with one [MockFunction] per trait method, which
//! implements the trait:
//!
//! ```rust
//! #[callmock::mock]
//! trait Store {
//!     fn get(&self, key: &str) -> Option<String>;
//! }
//!
//! let store = StoreMock::new();
//! store.get.returns(Some("value".to_string()));
//!
//! assert_eq!(Some("value".to_string()), store.get("key"));
//! store.get.require_called().with(("key".to_string(),)).once();
//! ```
//!
//! # Generic functions
//!
//! A [MockTemplateFunction] records calls whose argument types vary between calls, which is what
//! generic functions need. See [capture!] and [call!].
//!
//! # Assertions
//!
//! `check_called` and `require_called` start a [FunctionAssertion]. Its outcome goes to a
//! [Reporter], by default a [StderrReporter]. A failing `require` assertion also panics.

#![forbid(unsafe_code)]

mod arg;
mod assertion;
mod capture;
mod error;
mod function;
mod mismatch;
mod recorder;
mod report;
mod responder;
mod template;
mod verify;

#[doc(hidden)]
pub mod private;

pub use arg::{Arg, Caps, NON_DEBUG_MARKER, PLACEHOLDER_MARKER};
pub use assertion::{FunctionAssertion, Verdict};
pub use capture::{
    AnyCapture, ArgTuple, Arguments, CaptureStrategy, ComparableArguments, KnownArguments,
    UnknownArguments,
};
pub use error::{FnCall, MockError};
pub use function::{MockFunction, DEFAULT_NAME};
pub use recorder::{Recorder, When};
#[cfg(feature = "tracing")]
pub use report::TracingReporter;
pub use report::{install_reporter, Location, Reporter, Severity, StderrReporter, VERBOSE_ENV};
pub use template::{MockTemplateFunction, DEFAULT_TEMPLATE_NAME};

/// Generate a mock implementation of a trait.
///
/// For a trait `Foo`, this generates a struct `FooMock` (rename it with `#[mock(name = MyMock)]`)
/// with one public [MockFunction] field per method, named after the method, and implements `Foo`
/// for it by forwarding every call to its field.
///
/// Arguments are recorded by value. Borrowed arguments are recorded as their owned form: `&T` and
/// `&mut T` as `T`, `&str` as `String` and `&[T]` as `Vec<T>`.
///
/// Supported methods take `&self` or `&mut self`, have no type parameters, and return an owned type.
/// Methods without a receiver must have a default body, which is kept.
///
/// ```rust
/// #[callmock::mock]
/// trait Clock {
///     fn now(&self) -> u64;
///     fn sleep(&mut self, millis: u64);
/// }
///
/// let mut clock = ClockMock::new();
/// clock.now.action(|| 1000);
/// clock.sleep(5);
///
/// assert_eq!(1000, clock.now());
/// clock.sleep.require_called().with((5,)).once();
/// ```
pub use callmock_macros::mock;

/// Probe the [Caps] of a type.
///
/// Expands where the type is concrete, so the result reflects whether the type implements [Clone],
/// [PartialEq] and [Debug](core::fmt::Debug).
///
/// ```rust
/// struct Opaque;
///
/// assert!(callmock::caps!(String).is_comparable());
/// assert!(!callmock::caps!(Opaque).is_copyable());
/// ```
#[macro_export]
macro_rules! caps {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::private::{
            NoClone, NoDebug, NoPartialEq, ProperClone, ProperDebug, ProperPartialEq,
        };
        let probe = $crate::private::Probe::<$ty>::new();
        $crate::private::caps_from_parts(
            &probe,
            (&probe).callmock_clone_fn(),
            (&probe).callmock_eq_fn(),
            (&probe).callmock_debug_fn(),
        )
    }};
}

/// Capture one value as an [Arg], probing its type's capabilities.
///
/// The value is borrowed. It is copied into the [Arg] if its type implements [Clone].
#[macro_export]
macro_rules! arg {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::private::{
            NoClone, NoDebug, NoPartialEq, ProperClone, ProperDebug, ProperPartialEq,
        };
        let value = &$value;
        let probe = $crate::private::Probe::of(value);
        let caps = $crate::private::caps_from_parts(
            &probe,
            (&probe).callmock_clone_fn(),
            (&probe).callmock_eq_fn(),
            (&probe).callmock_debug_fn(),
        );
        $crate::Arg::capture(value, &caps)
    }};
}

/// Capture a list of values as an [AnyCapture], for use with a [MockTemplateFunction].
///
/// Every value's type must be `'static`. Integer and float literals take their default type
/// unless suffixed, so `capture!(7)` holds an `i32`.
#[macro_export]
macro_rules! capture {
    ($($value:expr),* $(,)?) => {
        $crate::AnyCapture::new(($($crate::arg!($value),)*))
    };
}

/// Call a [MockTemplateFunction] with a list of values.
///
/// ```rust
/// use callmock::*;
///
/// let f = MockTemplateFunction::<i32>::new();
/// f.when(capture!(7_i32, "bar")).returns(1);
/// f.returns(0);
///
/// assert_eq!(1, call!(f, 7_i32, "bar"));
/// assert_eq!(0, call!(f, 7_i64, "bar"));
/// assert_eq!(0, call!(f));
/// ```
#[macro_export]
macro_rules! call {
    ($mock:expr $(, $value:expr)* $(,)?) => {
        $mock.call($crate::capture!($($value),*))
    };
}

/// Create a [MockFunction] from a function signature, for any argument types.
///
/// ```rust
/// struct Handle(u32);
///
/// let close = callmock::mock_function!(fn(Handle) -> bool);
/// close.returns(true);
///
/// assert!(close.call((&Handle(1),)));
/// assert!(close.at(0).0.is_placeholder());
/// ```
#[macro_export]
macro_rules! mock_function {
    (fn($($arg:ty),* $(,)?) -> $ret:ty) => {
        $crate::MockFunction::<($($arg,)*), $ret>::with_caps(($($crate::caps!($arg),)*))
    };
    (fn($($arg:ty),* $(,)?)) => {
        $crate::mock_function!(fn($($arg),*) -> ())
    };
}

/// The source location of the invocation, including the enclosing function's name.
///
/// For use with the `check` and `require` methods of mocks.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(
            $crate::private::enclosing_function({
                fn __callmock_here() {}
                __callmock_here
            }),
            file!(),
            line!(),
        )
    };
}
