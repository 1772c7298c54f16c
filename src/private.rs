//! Support code for the crate's macros. Not part of the public API.

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use crate::arg::Caps;

/// A zero-sized stand-in for a type whose capabilities are being probed.
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    #[inline]
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Probe the type of an existing value.
    #[inline]
    pub fn of(_: &T) -> Self {
        Self(PhantomData)
    }
}

// Autoref specialization:
// https://github.com/dtolnay/case-studies/blob/master/autoref-specialization/README.md
//
// Each capability has a "proper" trait implemented for `Probe<T>` when `T` supports the operation,
// and a fallback trait implemented for `&Probe<T>`. Calling `(&probe).method()` picks the proper
// impl when it applies, since it needs one less auto-ref.

/// Resolves to `T`'s [Clone] implementation.
pub trait ProperClone<T> {
    fn callmock_clone_fn(&self) -> Option<fn(&T) -> T>;
}

/// Fallback for types that do not implement [Clone].
pub trait NoClone<T> {
    fn callmock_clone_fn(&self) -> Option<fn(&T) -> T>;
}

impl<T: Clone> ProperClone<T> for Probe<T> {
    #[inline]
    fn callmock_clone_fn(&self) -> Option<fn(&T) -> T> {
        Some(<T as Clone>::clone)
    }
}

impl<T> NoClone<T> for &Probe<T> {
    #[inline]
    fn callmock_clone_fn(&self) -> Option<fn(&T) -> T> {
        None
    }
}

/// Resolves to `T`'s [PartialEq] implementation.
pub trait ProperPartialEq<T> {
    fn callmock_eq_fn(&self) -> Option<fn(&T, &T) -> bool>;
}

/// Fallback for types that do not implement [PartialEq].
pub trait NoPartialEq<T> {
    fn callmock_eq_fn(&self) -> Option<fn(&T, &T) -> bool>;
}

impl<T: PartialEq> ProperPartialEq<T> for Probe<T> {
    #[inline]
    fn callmock_eq_fn(&self) -> Option<fn(&T, &T) -> bool> {
        Some(<T as PartialEq>::eq)
    }
}

impl<T> NoPartialEq<T> for &Probe<T> {
    #[inline]
    fn callmock_eq_fn(&self) -> Option<fn(&T, &T) -> bool> {
        None
    }
}

/// Resolves to `T`'s [fmt::Debug] implementation.
pub trait ProperDebug<T> {
    #[allow(clippy::type_complexity)]
    fn callmock_debug_fn(&self) -> Option<fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>;
}

/// Fallback for types that do not implement [fmt::Debug].
pub trait NoDebug<T> {
    #[allow(clippy::type_complexity)]
    fn callmock_debug_fn(&self) -> Option<fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>;
}

impl<T: fmt::Debug> ProperDebug<T> for Probe<T> {
    #[inline]
    fn callmock_debug_fn(&self) -> Option<fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result> {
        Some(<T as fmt::Debug>::fmt)
    }
}

impl<T> NoDebug<T> for &Probe<T> {
    #[inline]
    fn callmock_debug_fn(&self) -> Option<fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result> {
        None
    }
}

#[allow(clippy::type_complexity)]
pub fn caps_from_parts<T>(
    _probe: &Probe<T>,
    clone: Option<fn(&T) -> T>,
    eq: Option<fn(&T, &T) -> bool>,
    debug: Option<fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>,
) -> Caps<T> {
    Caps::from_parts(clone, eq, debug)
}

/// Name of the function enclosing a `location!()` invocation, given the marker fn item it defines.
pub fn enclosing_function<F>(_: F) -> &'static str {
    let mut name = type_name::<F>();
    name = name.strip_suffix("::__callmock_here").unwrap_or(name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}
