use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::assertion::FunctionAssertion;
use crate::capture::{display_capture, CaptureStrategy};
use crate::error::{FnCall, MockResult};
use crate::report::{Location, Severity};
use crate::responder::Responder;

/// Decides whether a conditional answer applies to a call.
enum Matcher<C> {
    /// The call's capture equals this pattern.
    Equals(C),
    Predicate(Box<dyn Fn(&C) -> bool>),
}

impl<C> Matcher<C> {
    fn matches<S: CaptureStrategy<Capture = C>>(&self, capture: &C) -> bool {
        match self {
            Self::Equals(expected) => S::equals(expected, capture),
            Self::Predicate(predicate) => predicate(capture),
        }
    }
}

struct Conditional<C, R> {
    matcher: Rc<Matcher<C>>,
    responder: Rc<Responder<R>>,
}

impl<C, R> Clone for Conditional<C, R> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            responder: self.responder.clone(),
        }
    }
}

struct State<C, R> {
    history: Vec<C>,
    default: Rc<Responder<R>>,
    conditionals: Vec<Conditional<C, R>>,
}

impl<C, R> State<C, R> {
    fn new() -> Self {
        Self {
            history: vec![],
            default: Rc::new(Responder::Unset),
            conditionals: vec![],
        }
    }
}

/// Records every call made to a mocked function and decides what each call returns.
///
/// `S` decides how arguments are captured, and `R` is the return type. Use it through one of its
/// two forms:
///
/// * [MockFunction](crate::MockFunction), for declared argument types.
/// * [MockTemplateFunction](crate::MockTemplateFunction), for argument types that vary per call.
///
/// A recorder belongs to one thread, and places no thread-safety requirements on argument or return
/// types. Answers are computed after the call is recorded and with no borrow of the recorder held,
/// so an `action` or a `when_fn` predicate may call back into the same mock.
pub struct Recorder<S: CaptureStrategy, R> {
    name: &'static str,
    strategy: S,
    state: RefCell<State<S::Capture, R>>,
}

impl<S: CaptureStrategy, R: 'static> Recorder<S, R> {
    pub(crate) fn from_strategy(name: &'static str, strategy: S) -> Self {
        Self {
            name,
            strategy,
            state: RefCell::new(State::new()),
        }
    }

    /// Name used in messages. By convention `Trait::method` for generated mocks.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn strategy(&self) -> &S {
        &self.strategy
    }

    fn state_mut(&self) -> RefMut<'_, State<S::Capture, R>> {
        self.state.borrow_mut()
    }

    /// Record a call, then compute its answer.
    pub(crate) fn invoke(&self, capture: S::Capture) -> MockResult<R> {
        let (conditionals, default) = {
            let mut state = self.state_mut();
            state.history.push(capture.clone());
            (state.conditionals.clone(), state.default.clone())
        };

        let responder = conditionals
            .iter()
            .find(|conditional| conditional.matcher.matches::<S>(&capture))
            .map(|conditional| &conditional.responder)
            .unwrap_or(&default);

        responder.respond(|| FnCall {
            name: self.name,
            inputs_debug: display_capture::<S>(&capture),
        })
    }

    /// Answer every call without a matching conditional answer with `value`.
    pub fn returns(&self, value: impl Into<R>)
    where
        R: Clone,
    {
        self.set_default(Responder::value(value.into()));
    }

    /// Answer every call without a matching conditional answer by calling `f`.
    pub fn action(&self, f: impl Fn() -> R + 'static) {
        self.set_default(Responder::compute(f));
    }

    /// Make every call without a matching conditional answer panic with `message`.
    pub fn panics(&self, message: impl Into<String>) {
        self.set_default(Responder::Panic(message.into()));
    }

    /// Start a conditional answer for calls whose arguments equal `pattern`.
    ///
    /// Conditional answers are consulted in the order they were added, before the default answer.
    pub fn when(&self, pattern: S::Pattern) -> When<'_, S, R> {
        When {
            recorder: self,
            matcher: Matcher::Equals(self.strategy.capture_pattern(pattern)),
        }
    }

    /// Start a conditional answer for calls whose captured arguments satisfy `predicate`.
    pub fn when_fn(&self, predicate: impl Fn(&S::Capture) -> bool + 'static) -> When<'_, S, R> {
        When {
            recorder: self,
            matcher: Matcher::Predicate(Box::new(predicate)),
        }
    }

    fn set_default(&self, responder: Responder<R>) {
        self.state_mut().default = Rc::new(responder);
    }

    fn push_conditional(&self, matcher: Matcher<S::Capture>, responder: Responder<R>) {
        self.state_mut().conditionals.push(Conditional {
            matcher: Rc::new(matcher),
            responder: Rc::new(responder),
        });
    }

    /// Forget both the recorded calls and the configured answers.
    pub fn clear(&self) {
        *self.state_mut() = State::new();
    }

    /// Forget the recorded calls.
    pub fn clear_captures(&self) {
        self.state_mut().history.clear();
    }

    /// Forget the configured answers.
    pub fn clear_returns(&self) {
        let mut state = self.state_mut();
        state.default = Rc::new(Responder::Unset);
        state.conditionals.clear();
    }

    pub fn call_count(&self) -> usize {
        self.state_mut().history.len()
    }

    pub fn has_calls(&self) -> bool {
        self.call_count() > 0
    }

    /// The arguments of the call at `index`, in call order.
    ///
    /// # Panics
    /// If fewer than `index + 1` calls were recorded.
    #[track_caller]
    pub fn at(&self, index: usize) -> S::Capture {
        let state = self.state_mut();
        match state.history.get(index) {
            Some(capture) => capture.clone(),
            None => panic!(
                "{}: call index {index} out of range, {} calls recorded",
                self.name,
                state.history.len()
            ),
        }
    }

    /// The arguments of the call at `index`, if there was one.
    pub fn get(&self, index: usize) -> Option<S::Capture> {
        self.state_mut().history.get(index).cloned()
    }

    /// A copy of all recorded calls, in call order.
    pub fn history(&self) -> Vec<S::Capture> {
        self.state_mut().history.clone()
    }

    pub fn iter(&self) -> std::vec::IntoIter<S::Capture> {
        self.history().into_iter()
    }

    /// Start a non-fatal assertion about the calls recorded so far.
    #[track_caller]
    pub fn check_called(&self) -> FunctionAssertion<S>
    where
        S: Clone,
    {
        self.check(Location::caller())
    }

    /// Start a fatal assertion about the calls recorded so far.
    #[track_caller]
    pub fn require_called(&self) -> FunctionAssertion<S>
    where
        S: Clone,
    {
        self.require(Location::caller())
    }

    /// [Self::check_called] with an explicit location, as produced by [location!](crate::location).
    pub fn check(&self, location: Location) -> FunctionAssertion<S>
    where
        S: Clone,
    {
        self.assertion(location, Severity::Check)
    }

    /// [Self::require_called] with an explicit location, as produced by [location!](crate::location).
    pub fn require(&self, location: Location) -> FunctionAssertion<S>
    where
        S: Clone,
    {
        self.assertion(location, Severity::Require)
    }

    fn assertion(&self, location: Location, severity: Severity) -> FunctionAssertion<S>
    where
        S: Clone,
    {
        FunctionAssertion::new(
            self.name,
            self.strategy.clone(),
            self.history(),
            location,
            severity,
        )
    }
}

impl<'r, S: CaptureStrategy, R: 'static> IntoIterator for &'r Recorder<S, R> {
    type Item = S::Capture;
    type IntoIter = std::vec::IntoIter<S::Capture>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An unfinished conditional answer, see [Recorder::when].
#[must_use = "a conditional answer is only added by `returns`, `action` or `panics`"]
pub struct When<'r, S: CaptureStrategy, R> {
    recorder: &'r Recorder<S, R>,
    matcher: Matcher<S::Capture>,
}

impl<'r, S: CaptureStrategy, R: 'static> When<'r, S, R> {
    pub fn returns(self, value: impl Into<R>)
    where
        R: Clone,
    {
        self.recorder
            .push_conditional(self.matcher, Responder::value(value.into()));
    }

    pub fn action(self, f: impl Fn() -> R + 'static) {
        self.recorder
            .push_conditional(self.matcher, Responder::compute(f));
    }

    pub fn panics(self, message: impl Into<String>) {
        self.recorder
            .push_conditional(self.matcher, Responder::Panic(message.into()));
    }
}
