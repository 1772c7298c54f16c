use core::fmt;

/// How a value whose type has no [fmt::Debug] implementation is rendered.
pub const NON_DEBUG_MARKER: &str = "?";

/// How an argument that could not be copied is rendered.
pub const PLACEHOLDER_MARKER: &str = "<placeholder>";

type CloneFn<T> = fn(&T) -> T;
type EqFn<T> = fn(&T, &T) -> bool;
type DebugFn<T> = fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result;

/// The capabilities of an argument type.
///
/// Rust cannot ask "does `T` implement `PartialEq`?" inside generic code, so the question is asked
/// once, in a macro expansion where `T` is concrete (see [caps!](crate::caps)), and the answer is
/// stored as a set of function pointers.
pub struct Caps<T> {
    pub(crate) clone: Option<CloneFn<T>>,
    pub(crate) eq: Option<EqFn<T>>,
    pub(crate) debug: Option<DebugFn<T>>,
}

impl<T> Caps<T> {
    /// Capabilities of a type that can be copied, compared and printed.
    pub fn full() -> Self
    where
        T: Clone + PartialEq + fmt::Debug,
    {
        Self {
            clone: Some(<T as Clone>::clone),
            eq: Some(<T as PartialEq>::eq),
            debug: Some(<T as fmt::Debug>::fmt),
        }
    }

    /// Capabilities of a type that supports none of the probed operations.
    pub fn none() -> Self {
        Self {
            clone: None,
            eq: None,
            debug: None,
        }
    }

    pub(crate) fn from_parts(
        clone: Option<CloneFn<T>>,
        eq: Option<EqFn<T>>,
        debug: Option<DebugFn<T>>,
    ) -> Self {
        Self { clone, eq, debug }
    }

    /// Whether values of `T` are stored by copy (as opposed to as a placeholder).
    pub fn is_copyable(&self) -> bool {
        self.clone.is_some()
    }

    /// Whether values of `T` are compared using `T`'s own equality.
    pub fn is_comparable(&self) -> bool {
        self.eq.is_some()
    }

    /// Whether values of `T` are rendered using `T`'s own [fmt::Debug].
    pub fn is_printable(&self) -> bool {
        self.debug.is_some()
    }
}

impl<T> Clone for Caps<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Caps<T> {}

impl<T> fmt::Debug for Caps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caps")
            .field("copyable", &self.is_copyable())
            .field("comparable", &self.is_comparable())
            .field("printable", &self.is_printable())
            .finish()
    }
}

/// What a placeholder remembers of a non-copyable argument.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Identity {
    /// The address the argument lived at when it was captured.
    Address(usize),
    /// Built from an owned value in a pattern. Stands for any non-copyable argument.
    Pattern,
}

impl Identity {
    fn of<T>(value: &T) -> Self {
        Self::Address(value as *const T as usize)
    }

    fn matches(self, other: Self) -> bool {
        match (self, other) {
            (Self::Pattern, _) | (_, Self::Pattern) => true,
            (Self::Address(lhs), Self::Address(rhs)) => lhs == rhs,
        }
    }
}

enum Slot<T> {
    Value { value: T, clone: CloneFn<T> },
    Placeholder(Identity),
}

/// One captured argument.
///
/// An `Arg` is always comparable and printable, whatever `T` is:
///
/// * If `T` could be copied, the `Arg` owns a copy. It compares using `T`'s equality when `T` has
///   one, and never compares equal otherwise. It prints using `T`'s `Debug` when available,
///   and as `?` otherwise.
/// * If `T` could not be copied, the `Arg` is a placeholder that remembers where the argument lived.
///   Captures of the same instance are equal, captures of distinct live instances are not. A
///   placeholder built from an owned value (as in a `with` or `when` pattern) is equal to every
///   placeholder. Placeholders always print as `<placeholder>`.
///
/// Zero-sized values carry no state, and instances that occupy the same address at different
/// times, such as by-value parameters of successive calls, are not told apart.
pub struct Arg<T> {
    slot: Slot<T>,
    eq: Option<EqFn<T>>,
    debug: Option<DebugFn<T>>,
}

impl<T> Arg<T> {
    /// Wrap a value of a type that is known to be copyable, comparable and printable.
    pub fn new(value: T) -> Self
    where
        T: Clone + PartialEq + fmt::Debug,
    {
        Self::from_value(value, &Caps::full())
    }

    /// Capture an argument passed by reference, copying it if the capabilities allow.
    pub fn capture(value: &T, caps: &Caps<T>) -> Self {
        match caps.clone {
            Some(clone) => Self {
                slot: Slot::Value {
                    value: clone(value),
                    clone,
                },
                eq: caps.eq,
                debug: caps.debug,
            },
            None => Self::placeholder(Identity::of(value), caps),
        }
    }

    /// Capture an owned value.
    ///
    /// A value of a non-copyable type is dropped and replaced by a placeholder that is equal to any
    /// other placeholder, so a pattern can match calls whose arguments can't be copied.
    pub fn from_value(value: T, caps: &Caps<T>) -> Self {
        match caps.clone {
            Some(clone) => Self {
                slot: Slot::Value { value, clone },
                eq: caps.eq,
                debug: caps.debug,
            },
            None => Self::placeholder(Identity::Pattern, caps),
        }
    }

    fn placeholder(identity: Identity, caps: &Caps<T>) -> Self {
        Self {
            slot: Slot::Placeholder(identity),
            eq: caps.eq,
            debug: caps.debug,
        }
    }

    /// The captured value, unless this is a placeholder.
    pub fn value(&self) -> Option<&T> {
        match &self.slot {
            Slot::Value { value, .. } => Some(value),
            Slot::Placeholder(_) => None,
        }
    }

    /// Consume the `Arg`, returning the captured value unless this is a placeholder.
    pub fn into_value(self) -> Option<T> {
        match self.slot {
            Slot::Value { value, .. } => Some(value),
            Slot::Placeholder(_) => None,
        }
    }

    /// Whether the argument could not be copied and only its identity was recorded.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.slot, Slot::Placeholder(_))
    }
}

impl<T> Clone for Arg<T> {
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Value { value, clone } => Slot::Value {
                value: clone(value),
                clone: *clone,
            },
            Slot::Placeholder(id) => Slot::Placeholder(*id),
        };

        Self {
            slot,
            eq: self.eq,
            debug: self.debug,
        }
    }
}

impl<T> PartialEq for Arg<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.slot, &other.slot) {
            (Slot::Value { value: lhs, .. }, Slot::Value { value: rhs, .. }) => {
                self.eq.map_or(false, |eq| eq(lhs, rhs))
            }
            (Slot::Placeholder(lhs), Slot::Placeholder(rhs)) => lhs.matches(*rhs),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.slot, self.debug) {
            (Slot::Value { value, .. }, Some(debug)) => debug(value, f),
            (Slot::Value { .. }, None) => f.write_str(NON_DEBUG_MARKER),
            (Slot::Placeholder(_), _) => f.write_str(PLACEHOLDER_MARKER),
        }
    }
}
