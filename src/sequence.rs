//! Sequential glue: run one callback, then pipe its result into the next.

use crate::core::{Callback, Resolved};
use bytes::Bytes;

/// Runs `first`, then activates `second` with `first`'s result and whatever
/// bytes `first` left unconsumed.
///
/// Equivalent to the Haskell `>>>` arrow operator. [`bind`] is a thin alias
/// kept for callers migrating code written against that older name.
pub fn compose<In, Mid, Out, A, B>(first: A, second: B) -> impl FnOnce(In, Bytes) -> Resolved<Out>
where
    In: 'static,
    Mid: 'static,
    Out: 'static,
    A: Callback<In, Out = Mid> + 'static,
    B: Callback<Mid, Out = Out> + 'static,
{
    move |input, bytes| first.activate(input, bytes).and_then(move |value, rest| second.activate(value, rest))
}

/// An alias for [`compose`], kept for callers used to the older name. The
/// two are semantically identical; `compose` is the name to reach for in
/// new code.
pub fn bind<In, Mid, Out, A, B>(first: A, second: B) -> impl FnOnce(In, Bytes) -> Resolved<Out>
where
    In: 'static,
    Mid: 'static,
    Out: 'static,
    A: Callback<In, Out = Mid> + 'static,
    B: Callback<Mid, Out = Out> + 'static,
{
    compose(first, second)
}
