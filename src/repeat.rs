//! The repetition combinator: [`fold`].
//!
//! `fold(wrapped)` iterates `wrapped` on the stream until `wrapped` rejects
//! the very first byte of an iteration, at which point `fold` succeeds with
//! the most recent successful result. This is the library's hardest
//! control-flow piece, because `wrapped` must commit to success or a
//! recoverable parse error *synchronously* on its first-chunk delivery:
//! partial consumption followed by a later parse error cannot be
//! backtracked, and is instead surfaced as a parse error of the `fold`
//! itself.
//!
//! `wrapped` is re-activated through the same [`Spec`] on every iteration
//! (rather than through a single reused callback value), since each
//! activation consumes the callback it is given.

use crate::core::{Callback, Continue, Resolved, Spec};
use crate::error::ErrorKind;
use bytes::Bytes;

/// Calls `wrapped` repeatedly, feeding each iteration's result in as the next
/// iteration's input, until `wrapped` refuses the first byte of an
/// iteration. Succeeds with the most recently retained result.
///
/// `wrapped` must consume at least one byte per successful iteration for
/// `fold` to terminate on a finite input; a `wrapped` that can succeed
/// without consuming anything will loop forever on trailing data (the same
/// caveat `fold`-like combinators in every push- or pull-parser library
/// share).
pub fn fold<T, S>(spec: S) -> impl FnOnce(T, Bytes) -> Resolved<T>
where
    T: Clone + 'static,
    S: Spec<T> + 'static,
    S::Callback: Callback<T, Out = T>,
{
    move |input, bytes| fold_activate(spec, input, bytes)
}

fn fold_activate<T, S>(spec: S, input: T, bytes: Bytes) -> Resolved<T>
where
    T: Clone + 'static,
    S: Spec<T> + 'static,
    S::Callback: Callback<T, Out = T>,
{
    let last_result = input.clone();
    let resolved = spec.build().activate(input, bytes.clone());
    fold_react(spec, resolved, bytes, last_result)
}

/// `chunk` is the exact bytes most recently handed to `wrapped` this
/// iteration, kept around only so it can be handed back unconsumed if
/// `wrapped` rejects it outright (the fold has not locked into
/// [`fold_locked`] yet, so this is still recoverable).
fn fold_react<T, S>(spec: S, resolved: Resolved<T>, chunk: Bytes, last_result: T) -> Resolved<T>
where
    T: Clone + 'static,
    S: Spec<T> + 'static,
    S::Callback: Callback<T, Out = T>,
{
    match resolved {
        Resolved::Success(next_input, rest) => fold_activate(spec, next_input, rest),
        Resolved::Error(ErrorKind::ParseError, _message) => {
            crate::trace::event("fold", "initial parse error, folding back to last result");
            Resolved::Success(last_result, chunk)
        }
        Resolved::Error(kind, message) => Resolved::Error(kind, message),
        Resolved::Incomplete(cont) => {
            if !chunk.is_empty() {
                // The stream has been irreversibly consumed: from here on a
                // parse error in `wrapped` is a real parse error of the fold.
                Resolved::Incomplete(Continue::new(move |bytes| {
                    fold_locked(spec, cont.resume(bytes))
                }))
            } else {
                // Activation (or a previous round of this same branch)
                // carried no bytes yet, so nothing has been consumed; this
                // doesn't count against the "no parse errors after
                // incompletes" rule.
                Resolved::Incomplete(Continue::new(move |bytes| {
                    if bytes.is_empty() {
                        crate::trace::event("fold", "eof between iterations");
                        Resolved::Success(last_result, Bytes::new())
                    } else {
                        let chunk = bytes.clone();
                        fold_react(spec, cont.resume(bytes), chunk, last_result)
                    }
                }))
            }
        }
    }
}

fn fold_locked<T, S>(spec: S, resolved: Resolved<T>) -> Resolved<T>
where
    T: Clone + 'static,
    S: Spec<T> + 'static,
    S::Callback: Callback<T, Out = T>,
{
    match resolved {
        Resolved::Success(next_input, rest) => fold_activate(spec, next_input, rest),
        Resolved::Error(ErrorKind::ParseError, message) => {
            crate::trace::event("fold", "later parse error, cannot fold back");
            Resolved::Error(
                ErrorKind::ParseError,
                format!("fold: parse error after incomplete: {message}"),
            )
        }
        Resolved::Error(kind, message) => Resolved::Error(kind, message),
        Resolved::Incomplete(cont) => Resolved::Incomplete(Continue::new(move |bytes| {
            fold_locked(spec, cont.resume(bytes))
        })),
    }
}
