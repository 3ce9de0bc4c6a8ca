//! The [`Driver`]: the top-level object that owns a callback tree and mediates
//! between the host and the parse.
//!
//! The host calls [`Driver::set_top_callback`] once to wire in the
//! combinator tree, then [`Driver::activate`] with the initial input, then
//! [`Driver::submit`] with each arriving chunk, and finally [`Driver::eof`].
//! Internally the driver only ever holds a *continue continuation*; every
//! call either completes the parse (success or error) or hands back a new
//! continuation to invoke with the next chunk.

use crate::core::{Callback, Continue, Resolved};
use crate::error::Status;
use bytes::Bytes;

enum State<Out> {
    Running(Continue<Out>),
    Done,
}

/// A top-level callback, wired in but not yet activated: an owned,
/// type-erased `activate` ready to run once `Driver::activate` supplies the
/// initial input.
type TopCallback<In, Out> = Box<dyn FnOnce(In, Bytes) -> Resolved<Out>>;

/// Owns the top-level callback, its continuation once running, the final
/// result, and the terminal status of a single parse.
///
/// A `Driver` is used for exactly one parse: build it, wire in a top-level
/// callback with [`set_top_callback`][Driver::set_top_callback], activate
/// it, submit chunks, and read back the result. Start a new `Driver` for the
/// next parse.
pub struct Driver<In, Out> {
    top: Option<TopCallback<In, Out>>,
    state: Option<State<Out>>,
    result: Option<Out>,
    status: Status,
}

impl<In: 'static, Out: 'static> Driver<In, Out> {
    /// Creates a driver with no result, no suspended continuation, and no
    /// top-level callback wired in yet.
    pub fn new() -> Self {
        Driver {
            top: None,
            state: None,
            result: None,
            status: Status::Incomplete,
        }
    }

    /// Wires `callback` in as the top of the combinator tree this driver will
    /// run: the callback's eventual success, incompleteness, or error is, by
    /// construction, what reaches this driver's `activate`/`submit`/`eof`
    /// terminal handling. This only wires `callback` in; it does not run it
    /// — call [`activate`][Driver::activate] to do that.
    ///
    /// Calling this again before `activate` replaces whatever was wired in
    /// previously.
    pub fn set_top_callback<C>(&mut self, callback: C)
    where
        C: Callback<In, Out = Out> + 'static,
    {
        self.top = Some(Box::new(move |input, bytes| callback.activate(input, bytes)));
    }

    /// Activates the wired-in top callback with `input` and no initial
    /// bytes, and returns the resulting status.
    ///
    /// # Panics
    ///
    /// Panics if [`set_top_callback`][Driver::set_top_callback] has not been
    /// called yet.
    pub fn activate(&mut self, input: In) -> Status {
        let top = self
            .top
            .take()
            .expect("pushcomb::Driver::activate called before set_top_callback");
        self.resolve(top(input, Bytes::new()))
    }

    /// Submits the next chunk of bytes to a suspended parse.
    ///
    /// If the parse already reached a terminal status, the bytes are
    /// silently absorbed and the terminal status is returned again: a
    /// successful parse installs a continuation that swallows trailing
    /// input, and a failed parse stays latched on its error.
    ///
    /// # Panics
    ///
    /// Panics if the parse has never been activated.
    pub fn submit(&mut self, bytes: impl Into<Bytes>) -> Status {
        match self.state.take() {
            Some(State::Running(cont)) => {
                let status = self.resolve(cont.resume(bytes.into()));
                status
            }
            Some(State::Done) => {
                self.state = Some(State::Done);
                self.status.clone()
            }
            None => panic!("pushcomb::Driver::submit called before activate"),
        }
    }

    /// Signals end-of-stream to a suspended parse: an empty final chunk.
    ///
    /// If the parse has already terminated (successfully or with an error),
    /// this just returns the terminal status again.
    pub fn eof(&mut self) -> Status {
        match self.state.take() {
            Some(State::Running(cont)) => self.resolve(cont.resume(Bytes::new())),
            Some(State::Done) => {
                self.state = Some(State::Done);
                self.status.clone()
            }
            None => self.status.clone(),
        }
    }

    /// Takes the final success value, if the parse completed successfully.
    ///
    /// Returns `None` if the parse has not completed, ended in error, or the
    /// result was already taken.
    pub fn result(&mut self) -> Option<Out> {
        self.result.take()
    }

    /// The status of the most recent `activate`/`submit`/`eof` call.
    pub fn status(&self) -> &Status {
        &self.status
    }

    fn resolve(&mut self, resolved: Resolved<Out>) -> Status {
        match resolved {
            Resolved::Success(value, _trailing) => {
                crate::trace::event("driver", "success");
                self.result = Some(value);
                self.status = Status::Success;
                // Trailing bytes submitted after this point are silently
                // absorbed; see `submit`/`eof`'s `State::Done` handling.
                self.state = Some(State::Done);
            }
            Resolved::Incomplete(cont) => {
                crate::trace::event("driver", "incomplete");
                self.status = Status::Incomplete;
                self.state = Some(State::Running(cont));
            }
            Resolved::Error(kind, message) => {
                crate::trace::event("driver", "error");
                self.status = Status::from_error(kind, message);
                self.state = Some(State::Done);
            }
        }
        self.status.clone()
    }
}

impl<In: 'static, Out: 'static> Default for Driver<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}
