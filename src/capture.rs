//! Argument capture strategies.
//!
//! A recorder stores one capture per call. What a capture looks like depends on the strategy:
//!
//! * [KnownArguments] is used when the argument types are declared up front, and a capture is a plain
//!   tuple of [Arg]s.
//! * [UnknownArguments] is used when every call may pass a different list of argument types, and a
//!   capture is a type-erased [AnyCapture].

use core::any::Any;
use core::fmt;
use std::rc::Rc;

use crate::arg::{Arg, Caps};

/// A tuple of captured [Arg]s.
pub trait ArgTuple: Clone + PartialEq + fmt::Debug {
    /// Number of arguments in the tuple.
    const ARITY: usize;

    /// Write the arguments as a parenthesized, comma separated list, like `(1, "foo")`.
    fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// A tuple of declared argument types.
pub trait Arguments: Sized {
    /// The probed [Caps] of each argument type.
    type Caps: Copy;

    /// How one call's arguments are recorded.
    type Capture: ArgTuple;

    /// How the arguments are passed to a call.
    type Refs<'a>
    where
        Self: 'a;

    /// Capture the arguments of one call.
    fn capture_refs(refs: Self::Refs<'_>, caps: &Self::Caps) -> Self::Capture;

    /// Capture owned arguments, as used for patterns.
    fn capture_values(self, caps: &Self::Caps) -> Self::Capture;
}

/// Argument tuples whose element types can all be copied, compared and printed.
pub trait ComparableArguments: Arguments {
    fn full_caps() -> Self::Caps;
}

struct ArgList<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> ArgList<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>) -> Result<Self, fmt::Error> {
        f.write_str("(")?;
        Ok(Self { f, first: true })
    }

    fn entry(&mut self, entry: &dyn fmt::Debug) -> fmt::Result {
        if !self.first {
            self.f.write_str(", ")?;
        }
        self.first = false;
        entry.fmt(self.f)
    }

    fn finish(self) -> fmt::Result {
        self.f.write_str(")")
    }
}

macro_rules! impl_arguments {
    ($arity:literal; $($t:ident $idx:tt),*) => {
        impl<$($t),*> Arguments for ($($t,)*) {
            type Caps = ($(Caps<$t>,)*);
            type Capture = ($(Arg<$t>,)*);
            type Refs<'a> = ($(&'a $t,)*) where Self: 'a;

            #[allow(unused_variables, clippy::unused_unit)]
            fn capture_refs(refs: Self::Refs<'_>, caps: &Self::Caps) -> Self::Capture {
                ($(Arg::capture(refs.$idx, &caps.$idx),)*)
            }

            #[allow(unused_variables, clippy::unused_unit)]
            fn capture_values(self, caps: &Self::Caps) -> Self::Capture {
                ($(Arg::from_value(self.$idx, &caps.$idx),)*)
            }
        }

        impl<$($t: Clone + PartialEq + fmt::Debug),*> ComparableArguments for ($($t,)*) {
            #[allow(clippy::unused_unit)]
            fn full_caps() -> Self::Caps {
                ($(Caps::<$t>::full(),)*)
            }
        }

        impl<$($t),*> ArgTuple for ($(Arg<$t>,)*) {
            const ARITY: usize = $arity;

            #[allow(unused_mut)]
            fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut list = ArgList::new(f)?;
                $(list.entry(&self.$idx)?;)*
                list.finish()
            }
        }
    };
}

impl_arguments!(0;);
impl_arguments!(1; A0 0);
impl_arguments!(2; A0 0, A1 1);
impl_arguments!(3; A0 0, A1 1, A2 2);
impl_arguments!(4; A0 0, A1 1, A2 2, A3 3);
impl_arguments!(5; A0 0, A1 1, A2 2, A3 3, A4 4);
impl_arguments!(6; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_arguments!(7; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_arguments!(8; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);

/// How a recorder captures, compares and prints the arguments of calls.
pub trait CaptureStrategy {
    /// One recorded call.
    type Capture: Clone;

    /// What a caller passes to describe an expected call.
    type Pattern;

    /// Turn a pattern into a capture that can be compared with recorded calls.
    fn capture_pattern(&self, pattern: Self::Pattern) -> Self::Capture;

    fn equals(lhs: &Self::Capture, rhs: &Self::Capture) -> bool;

    fn fmt_capture(capture: &Self::Capture, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn argument_count(capture: &Self::Capture) -> usize;
}

/// Capture strategy for a declared list of argument types `A`.
pub struct KnownArguments<A: Arguments> {
    pub(crate) caps: A::Caps,
}

impl<A: Arguments> KnownArguments<A> {
    pub fn new(caps: A::Caps) -> Self {
        Self { caps }
    }
}

impl<A: Arguments> Clone for KnownArguments<A> {
    fn clone(&self) -> Self {
        Self { caps: self.caps }
    }
}

impl<A: Arguments> CaptureStrategy for KnownArguments<A> {
    type Capture = A::Capture;
    type Pattern = A;

    fn capture_pattern(&self, pattern: A) -> A::Capture {
        pattern.capture_values(&self.caps)
    }

    fn equals(lhs: &A::Capture, rhs: &A::Capture) -> bool {
        lhs == rhs
    }

    fn fmt_capture(capture: &A::Capture, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ArgTuple::fmt_args(capture, f)
    }

    fn argument_count(_: &A::Capture) -> usize {
        <A::Capture as ArgTuple>::ARITY
    }
}

/// Capture strategy for calls whose argument types are only known at each call site.
#[derive(Clone, Copy, Default, Debug)]
pub struct UnknownArguments;

impl CaptureStrategy for UnknownArguments {
    type Capture = AnyCapture;
    type Pattern = AnyCapture;

    fn capture_pattern(&self, pattern: AnyCapture) -> AnyCapture {
        pattern
    }

    fn equals(lhs: &AnyCapture, rhs: &AnyCapture) -> bool {
        lhs == rhs
    }

    fn fmt_capture(capture: &AnyCapture, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        capture.0.fmt_args(f)
    }

    fn argument_count(capture: &AnyCapture) -> usize {
        capture.argument_count()
    }
}

trait DynCapture: 'static {
    fn as_any(&self) -> &dyn Any;
    fn equals(&self, other: &dyn DynCapture) -> bool;
    fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn argument_count(&self) -> usize;
}

impl<T: ArgTuple + 'static> DynCapture for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals(&self, other: &dyn DynCapture) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ArgTuple::fmt_args(self, f)
    }

    fn argument_count(&self) -> usize {
        T::ARITY
    }
}

/// The type-erased arguments of one call.
///
/// Two captures are equal when they hold the same number of arguments, of the same types, and every
/// pair of arguments is equal. Any difference in shape makes them unequal.
///
/// Usually created with the [capture!](crate::capture) macro.
#[derive(Clone)]
pub struct AnyCapture(Rc<dyn DynCapture>);

impl AnyCapture {
    /// Erase a tuple of [Arg]s.
    pub fn new<T: ArgTuple + 'static>(args: T) -> Self {
        Self(Rc::new(args))
    }

    pub fn argument_count(&self) -> usize {
        self.0.argument_count()
    }

    /// Access the captured tuple, if it has exactly the type `T`.
    pub fn downcast_ref<T: ArgTuple + 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for AnyCapture {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(other.0.as_ref())
    }
}

impl fmt::Debug for AnyCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_args(f)
    }
}

impl fmt::Display for AnyCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_args(f)
    }
}

/// Displays a capture of strategy `S`.
pub(crate) struct DisplayCapture<'c, S: CaptureStrategy>(pub &'c S::Capture);

impl<'c, S: CaptureStrategy> fmt::Display for DisplayCapture<'c, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        S::fmt_capture(self.0, f)
    }
}

pub(crate) fn display_capture<S: CaptureStrategy>(capture: &S::Capture) -> String {
    DisplayCapture::<S>(capture).to_string()
}
