//! The continuation-passing core that every combinator in this crate builds on.
//!
//! A [`Callback`] is the smallest unit a combinator can wrap: given an input
//! value and whatever bytes the driver has on hand, it must eventually
//! resolve to [`Resolved::Success`], [`Resolved::Error`], or
//! [`Resolved::Incomplete`] — and in the last case, hand back a [`Continue`]
//! that the driver will invoke with the next chunk.
//!
//! `Continue<T>` is an ordinary Rust closure: just a boxed
//! `FnOnce(Bytes) -> Resolved<T>`. The combinators in
//! [`sequence`][crate::sequence], [`product`][crate::product],
//! [`repeat`][crate::repeat], and [`window`][crate::window] are the types that
//! hold an inner callback and intercept its resolution to build a new one;
//! none of them need to touch this module's internals directly beyond
//! [`Resolved::and_then`].

use crate::error::ErrorKind;
use bytes::Bytes;

/// A one-shot continuation that resumes a suspended parse with the next chunk
/// of bytes. An empty chunk is the contractual end-of-stream signal.
pub struct Continue<T>(Box<dyn FnOnce(Bytes) -> Resolved<T>>);

impl<T> Continue<T> {
    /// Wraps a resumption function as a `Continue`.
    pub fn new(f: impl FnOnce(Bytes) -> Resolved<T> + 'static) -> Self {
        Continue(Box::new(f))
    }

    /// Resumes the suspended computation with the next chunk of bytes.
    pub fn resume(self, bytes: Bytes) -> Resolved<T> {
        (self.0)(bytes)
    }
}

/// The outcome of activating or resuming a [`Callback`].
pub enum Resolved<T> {
    /// The callback finished, producing `T` plus whatever trailing bytes it
    /// did not consume.
    Success(T, Bytes),
    /// The callback needs more bytes before it can decide; resume with the
    /// bundled [`Continue`].
    Incomplete(Continue<T>),
    /// The callback, or one of the callbacks it wraps, failed.
    Error(ErrorKind, String),
}

impl<T: 'static> Resolved<T> {
    /// Feeds the eventual success of `self` into `f`, threading the byte
    /// stream through any number of intervening suspensions.
    ///
    /// This is the engine's one piece of genuinely recursive control flow: it
    /// is `compose`'s sequencing rule in its most general form, and every
    /// combinator that runs one callback and then does something with its
    /// result (`compose`, `nth`, `all`) is built on top of it.
    pub fn and_then<U: 'static>(
        self,
        f: impl FnOnce(T, Bytes) -> Resolved<U> + 'static,
    ) -> Resolved<U> {
        match self {
            Resolved::Success(value, rest) => f(value, rest),
            Resolved::Error(kind, msg) => Resolved::Error(kind, msg),
            Resolved::Incomplete(cont) => Resolved::Incomplete(Continue::new(move |bytes| {
                cont.resume(bytes).and_then(f)
            })),
        }
    }

    /// Reacts to an incomplete resolution without touching success or error;
    /// useful for combinators that need to rewrap the continuation a wrapped
    /// callback hands back without changing what happens on its other two
    /// outcomes.
    pub fn map_incomplete(self, f: impl FnOnce(Continue<T>) -> Self + 'static) -> Self
    where
        T: 'static,
    {
        match self {
            Resolved::Incomplete(cont) => f(cont),
            other => other,
        }
    }
}

/// The smallest unit a combinator can wrap.
///
/// Implementations consume `self`: a callback is activated at most once per
/// parse scope, so there is no need for `&mut self` or for any state to
/// survive past the point where it resolves (the [`Continue`] it may hand
/// back captures whatever state the next resumption needs).
pub trait Callback<In> {
    /// The value this callback produces on success.
    type Out;

    /// Seeds the callback with its input and the bytes the driver has on hand
    /// so far. `bytes` may be empty; that does not by itself mean
    /// end-of-stream (only an empty chunk passed to a `Continue` does).
    fn activate(self, input: In, bytes: Bytes) -> Resolved<Self::Out>;
}

impl<In, Out, F> Callback<In> for F
where
    F: FnOnce(In, Bytes) -> Resolved<Out>,
{
    type Out = Out;

    fn activate(self, input: In, bytes: Bytes) -> Resolved<Out> {
        self(input, bytes)
    }
}

/// A zero-argument factory for a [`Callback`].
///
/// Most combinators only activate their wrapped callback once, so an owned
/// value would do. [`fold`][crate::repeat::fold] is the exception: it
/// re-activates its wrapped callback once per iteration, so it needs to build
/// a fresh one every time around the loop. Modeling every combinator
/// constructor as accepting (and producing) a factory keeps `fold` from being
/// a special case at the type level.
pub trait Spec<In> {
    /// The callback type this factory produces.
    type Callback: Callback<In>;

    /// Builds a fresh callback instance.
    fn build(&self) -> Self::Callback;
}

impl<In, C, F> Spec<In> for F
where
    F: Fn() -> C,
    C: Callback<In>,
{
    type Callback = C;

    fn build(&self) -> C {
        self()
    }
}
