//! Primitive callbacks: the leaves of a combinator tree.
//!
//! These operate on their own and do not wrap any other callback. All but
//! [`pure`] consume bytes off the stream as they go.

use crate::core::{Continue, Resolved};
use crate::error::ErrorKind;
use bytes::{Bytes, BytesMut};

/// Immediately succeeds with its input, forwarding all bytes unchanged.
///
/// `compose(noop, c) ≡ c ≡ compose(c, noop)`: this is the engine's identity
/// callback.
pub fn noop<T>(input: T, bytes: Bytes) -> Resolved<T> {
    Resolved::Success(input, bytes)
}

/// Consumes exactly as many bytes as given by its input `n`, across as many
/// chunks as it takes, then succeeds with `()`. Reaching end-of-stream with
/// bytes still owed is a parse error.
pub fn skip(n: usize, bytes: Bytes) -> Resolved<()> {
    skip_step(n, bytes)
}

fn skip_step(remaining: usize, mut bytes: Bytes) -> Resolved<()> {
    if bytes.len() >= remaining {
        let _ = bytes.split_to(remaining);
        return Resolved::Success((), bytes);
    }
    let consumed = bytes.len();
    let remaining = remaining - consumed;
    Resolved::Incomplete(Continue::new(move |bytes| {
        if bytes.is_empty() {
            return Resolved::Error(
                ErrorKind::ParseError,
                format!("skip: reached end of stream with {remaining} bytes still owed"),
            );
        }
        skip_step(remaining, bytes)
    }))
}

/// Waits until `size` bytes are contiguously available, then succeeds with a
/// zero-copy view of exactly that many bytes.
///
/// Fewer than `size` bytes at end-of-stream is a parse error. `fixed` does
/// its own accumulation, so it does not need to be wrapped in
/// [`min_bytes`][crate::window::min_bytes] to behave correctly, though doing
/// so is harmless.
pub fn fixed(size: usize) -> impl FnOnce((), Bytes) -> Resolved<Bytes> {
    move |(), bytes| fixed_step(size, BytesMut::new(), bytes)
}

fn fixed_step(size: usize, mut buffered: BytesMut, mut bytes: Bytes) -> Resolved<Bytes> {
    if buffered.is_empty() && bytes.len() >= size {
        let view = bytes.split_to(size);
        return Resolved::Success(view, bytes);
    }
    let take = size.saturating_sub(buffered.len()).min(bytes.len());
    buffered.extend_from_slice(&bytes.split_to(take));
    if buffered.len() >= size {
        return Resolved::Success(buffered.freeze(), bytes);
    }
    Resolved::Incomplete(Continue::new(move |bytes| {
        if bytes.is_empty() {
            return Resolved::Error(
                ErrorKind::ParseError,
                format!(
                    "fixed: reached end of stream with only {} of {size} bytes",
                    buffered.len()
                ),
            );
        }
        fixed_step(size, buffered, bytes)
    }))
}

/// Requires end-of-stream: succeeds with its input if the first byte count it
/// sees — at activation or on any later continuation — is zero, and fails
/// with a parse error otherwise.
pub fn eof<T>(input: T, bytes: Bytes) -> Resolved<T> {
    if bytes.is_empty() {
        return Resolved::Incomplete(Continue::new(move |bytes| {
            if bytes.is_empty() {
                Resolved::Success(input, bytes)
            } else {
                Resolved::Error(
                    ErrorKind::ParseError,
                    "eof: expected end of stream, found more data".into(),
                )
            }
        }));
    }
    Resolved::Error(
        ErrorKind::ParseError,
        "eof: expected end of stream, found more data".into(),
    )
}

/// Accumulates exactly as many bytes as given by its input `n` into an owned
/// buffer, appends a NUL sentinel, and succeeds with a view over the
/// buffer's content (including the sentinel). Named for the reference
/// implementation's "high water mark" string accumulator.
///
/// End-of-stream before `n` bytes have arrived is a parse error.
pub fn hwm_string(n: usize, bytes: Bytes) -> Resolved<Bytes> {
    hwm_string_step(n, BytesMut::with_capacity(n + 1), bytes)
}

fn hwm_string_step(n: usize, mut buffered: BytesMut, mut bytes: Bytes) -> Resolved<Bytes> {
    let take = (n - buffered.len()).min(bytes.len());
    buffered.extend_from_slice(&bytes.split_to(take));
    if buffered.len() == n {
        buffered.extend_from_slice(&[0u8]);
        return Resolved::Success(buffered.freeze(), bytes);
    }
    Resolved::Incomplete(Continue::new(move |bytes| {
        if bytes.is_empty() {
            return Resolved::Error(
                ErrorKind::ParseError,
                format!(
                    "hwm-string: reached end of stream with only {} of {n} bytes",
                    buffered.len()
                ),
            );
        }
        hwm_string_step(n, buffered, bytes)
    }))
}

/// Wraps a host-supplied function that synchronously computes an output (or
/// rejects the input) from an already-available value, without consuming any
/// bytes. `func` returning `None` is reported as a parse error.
pub fn pure<In, Out>(
    func: impl FnOnce(In) -> Option<Out> + 'static,
) -> impl FnOnce(In, Bytes) -> Resolved<Out> {
    move |input, bytes| match func(input) {
        Some(output) => Resolved::Success(output, bytes),
        None => Resolved::Error(ErrorKind::ParseError, "pure: function rejected input".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Callback;

    fn run<T>(resolved: Resolved<T>, chunks: &[&[u8]]) -> Resolved<T> {
        let mut resolved = resolved;
        for chunk in chunks {
            resolved = match resolved {
                Resolved::Incomplete(cont) => cont.resume(Bytes::copy_from_slice(chunk)),
                other => return other,
            };
        }
        resolved
    }

    #[test]
    fn noop_forwards_input_and_bytes() {
        let bytes = Bytes::from_static(b"rest");
        match noop(42, bytes.clone()) {
            Resolved::Success(value, rest) => {
                assert_eq!(value, 42);
                assert_eq!(rest, bytes);
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn skip_consumes_exactly_n_across_chunks() {
        let resolved = skip(5, Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b"cd", b"eXY"]);
        match resolved {
            Resolved::Success((), rest) => assert_eq!(rest, Bytes::from_static(b"XY")),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn skip_eof_with_bytes_owed_is_parse_error() {
        let resolved = skip(5, Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b""]);
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn fixed_waits_for_contiguous_bytes() {
        let resolved = fixed(4).activate((), Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b"cdef"]);
        match resolved {
            Resolved::Success(view, rest) => {
                assert_eq!(view, Bytes::from_static(b"abcd"));
                assert_eq!(rest, Bytes::from_static(b"ef"));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn fixed_forwards_directly_when_already_enough() {
        let resolved = fixed(2).activate((), Bytes::from_static(b"abcd"));
        match resolved {
            Resolved::Success(view, rest) => {
                assert_eq!(view, Bytes::from_static(b"ab"));
                assert_eq!(rest, Bytes::from_static(b"cd"));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn fixed_eof_short_is_parse_error() {
        let resolved = fixed(4).activate((), Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b""]);
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn eof_succeeds_on_empty_chunk() {
        match eof(7, Bytes::new()) {
            Resolved::Incomplete(cont) => match cont.resume(Bytes::new()) {
                Resolved::Success(value, rest) => {
                    assert_eq!(value, 7);
                    assert!(rest.is_empty());
                }
                _ => panic!("expected success"),
            },
            _ => panic!("expected incomplete"),
        }
    }

    #[test]
    fn eof_rejects_bytes_at_activation() {
        let resolved = eof((), Bytes::from_static(b"x"));
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn eof_rejects_bytes_on_continue() {
        let resolved = eof((), Bytes::new());
        let resolved = run(resolved, &[b"x"]);
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn hwm_string_assembles_across_chunks_with_nul_sentinel() {
        let resolved = hwm_string(5, Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b"cd", b"eXY"]);
        match resolved {
            Resolved::Success(buf, rest) => {
                assert_eq!(&buf[..], b"abcde\0");
                assert_eq!(rest, Bytes::from_static(b"XY"));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn hwm_string_eof_short_is_parse_error() {
        let resolved = hwm_string(5, Bytes::from_static(b"ab"));
        let resolved = run(resolved, &[b""]);
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn pure_some_succeeds_without_consuming_bytes() {
        let bytes = Bytes::from_static(b"untouched");
        let resolved = pure(|n: u32| Some(n * 2)).activate(21, bytes.clone());
        match resolved {
            Resolved::Success(value, rest) => {
                assert_eq!(value, 42);
                assert_eq!(rest, bytes);
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn pure_none_is_parse_error() {
        let resolved = pure(|_: u32| None::<u32>).activate(1, Bytes::new());
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }
}
