//! Product combinators: apply callbacks to components of a tuple.
//!
//! A tuple's arity and the type of each slot are known at compile time, so
//! "apply `wrapped` to element `i` of an `n`-tuple" is realized here as one
//! named constructor per (arity, index) pair — `first`/`second` for 2-tuples,
//! `first3`/`second3`/`third3` for 3-tuples — rather than a single function
//! parameterized by a runtime index. [`first`] and [`second`] cover the
//! 2-tuple case, by far the most common; the `*3` constructors show how the
//! pattern extends to wider tuples.

use crate::core::{Callback, Resolved};
use bytes::Bytes;

/// Succeeds immediately with a pair whose both elements are the input,
/// forwarding bytes unchanged.
pub fn dup<T: Clone>(input: T, bytes: Bytes) -> Resolved<(T, T)> {
    Resolved::Success((input.clone(), input), bytes)
}

/// Succeeds immediately with a 3-tuple whose every element is the input.
pub fn dup3<T: Clone>(input: T, bytes: Bytes) -> Resolved<(T, T, T)> {
    Resolved::Success((input.clone(), input.clone(), input), bytes)
}

/// Applies `wrapped` to the first element of a pair, leaving the second
/// element unchanged.
///
/// Equivalent to the Haskell `first` arrow operator.
pub fn first<A, B, A2, W>(wrapped: W) -> impl FnOnce((A, B), Bytes) -> Resolved<(A2, B)>
where
    A: 'static,
    B: 'static,
    A2: 'static,
    W: Callback<A, Out = A2> + 'static,
{
    move |(a, b), bytes| {
        wrapped
            .activate(a, bytes)
            .and_then(move |a2, rest| Resolved::Success((a2, b), rest))
    }
}

/// Applies `wrapped` to the second element of a pair, leaving the first
/// element unchanged.
///
/// Equivalent to the Haskell `second` arrow operator.
pub fn second<A, B, B2, W>(wrapped: W) -> impl FnOnce((A, B), Bytes) -> Resolved<(A, B2)>
where
    A: 'static,
    B: 'static,
    B2: 'static,
    W: Callback<B, Out = B2> + 'static,
{
    move |(a, b), bytes| {
        wrapped
            .activate(b, bytes)
            .and_then(move |b2, rest| Resolved::Success((a, b2), rest))
    }
}

/// Applies `a` to the first element of a 3-tuple, leaving the rest unchanged.
pub fn first3<A, B, C, A2, W>(wrapped: W) -> impl FnOnce((A, B, C), Bytes) -> Resolved<(A2, B, C)>
where
    A: 'static,
    B: 'static,
    C: 'static,
    A2: 'static,
    W: Callback<A, Out = A2> + 'static,
{
    move |(a, b, c), bytes| {
        wrapped
            .activate(a, bytes)
            .and_then(move |a2, rest| Resolved::Success((a2, b, c), rest))
    }
}

/// Applies `wrapped` to the second element of a 3-tuple, leaving the rest
/// unchanged.
pub fn second3<A, B, C, B2, W>(wrapped: W) -> impl FnOnce((A, B, C), Bytes) -> Resolved<(A, B2, C)>
where
    A: 'static,
    B: 'static,
    C: 'static,
    B2: 'static,
    W: Callback<B, Out = B2> + 'static,
{
    move |(a, b, c), bytes| {
        wrapped
            .activate(b, bytes)
            .and_then(move |b2, rest| Resolved::Success((a, b2, c), rest))
    }
}

/// Applies `wrapped` to the third element of a 3-tuple, leaving the rest
/// unchanged.
pub fn third3<A, B, C, C2, W>(wrapped: W) -> impl FnOnce((A, B, C), Bytes) -> Resolved<(A, B, C2)>
where
    A: 'static,
    B: 'static,
    C: 'static,
    C2: 'static,
    W: Callback<C, Out = C2> + 'static,
{
    move |(a, b, c), bytes| {
        wrapped
            .activate(c, bytes)
            .and_then(move |c2, rest| Resolved::Success((a, b, c2), rest))
    }
}

/// Applies `a` to element 0 and `b` to element 1 of a pair, returning the
/// pair of results.
///
/// The 2-element case of applying one callback per tuple slot in sequence.
pub fn par<A, B, A2, B2, CA, CB>(a: CA, b: CB) -> impl FnOnce((A, B), Bytes) -> Resolved<(A2, B2)>
where
    A: 'static,
    B: 'static,
    A2: 'static,
    B2: 'static,
    CA: Callback<A, Out = A2> + 'static,
    CB: Callback<B, Out = B2> + 'static,
{
    move |(x, y), bytes| {
        a.activate(x, bytes)
            .and_then(move |x2, rest| b.activate(y, rest).and_then(move |y2, rest2| Resolved::Success((x2, y2), rest2)))
    }
}

/// Applies `a`, `b`, and `c` to the three elements of a 3-tuple, returning
/// the tuple of results.
pub fn par3<A, B, C, A2, B2, C2, CA, CB, CC>(
    a: CA,
    b: CB,
    c: CC,
) -> impl FnOnce((A, B, C), Bytes) -> Resolved<(A2, B2, C2)>
where
    A: 'static,
    B: 'static,
    C: 'static,
    A2: 'static,
    B2: 'static,
    C2: 'static,
    CA: Callback<A, Out = A2> + 'static,
    CB: Callback<B, Out = B2> + 'static,
    CC: Callback<C, Out = C2> + 'static,
{
    move |tuple, bytes| {
        first3(a)
            .activate(tuple, bytes)
            .and_then(move |t, rest| second3(b).activate(t, rest))
            .and_then(move |t, rest| third3(c).activate(t, rest))
    }
}

/// Feeds a single input value to both `a` and `b`, returning the pair of
/// their results.
///
/// Equivalent to the Haskell `&&&` arrow operator, specialized to two
/// callbacks.
pub fn both<T, A2, B2, CA, CB>(a: CA, b: CB) -> impl FnOnce(T, Bytes) -> Resolved<(A2, B2)>
where
    T: Clone + 'static,
    A2: 'static,
    B2: 'static,
    CA: Callback<T, Out = A2> + 'static,
    CB: Callback<T, Out = B2> + 'static,
{
    move |input, bytes| dup(input, bytes).and_then(move |pair, rest| par(a, b).activate(pair, rest))
}

/// Feeds a single input value to `a`, `b`, and `c`, returning the 3-tuple of
/// their results.
pub fn all3<T, A2, B2, C2, CA, CB, CC>(
    a: CA,
    b: CB,
    c: CC,
) -> impl FnOnce(T, Bytes) -> Resolved<(A2, B2, C2)>
where
    T: Clone + 'static,
    A2: 'static,
    B2: 'static,
    C2: 'static,
    CA: Callback<T, Out = A2> + 'static,
    CB: Callback<T, Out = B2> + 'static,
    CC: Callback<T, Out = C2> + 'static,
{
    move |input, bytes| dup3(input, bytes).and_then(move |tuple, rest| par3(a, b, c).activate(tuple, rest))
}
