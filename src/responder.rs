//! Responders produce the answer of a mocked call.

use core::any::Any;

use crate::error::{FnCall, MockError, MockResult};

pub(crate) enum Responder<R> {
    /// Nothing configured. Only calls returning `()` can be answered.
    Unset,
    /// A fixed value, copied out for every call.
    Value { value: R, clone: fn(&R) -> R },
    /// A user function, evaluated on every call.
    Compute(Box<dyn Fn() -> R>),
    Panic(String),
}

impl<R: 'static> Responder<R> {
    pub fn value(value: R) -> Self
    where
        R: Clone,
    {
        Self::Value {
            value,
            clone: R::clone,
        }
    }

    pub fn compute(f: impl Fn() -> R + 'static) -> Self {
        Self::Compute(Box::new(f))
    }

    pub fn respond(&self, call: impl FnOnce() -> FnCall) -> MockResult<R> {
        match self {
            Self::Unset => unit_output::<R>().ok_or_else(|| MockError::NoReturnConfigured {
                call: call(),
            }),
            Self::Value { value, clone } => Ok(clone(value)),
            Self::Compute(f) => Ok(f()),
            Self::Panic(message) => Err(MockError::ExplicitPanic {
                call: call(),
                message: message.clone(),
            }),
        }
    }
}

/// `Some(())` when `R` is the unit type.
fn unit_output<R: 'static>() -> Option<R> {
    let unit: Box<dyn Any> = Box::new(());
    unit.downcast::<R>().ok().map(|unit| *unit)
}
