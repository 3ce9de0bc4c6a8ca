//! Byte-window combinators: [`min_bytes`] buffers up to a minimum before
//! forwarding, [`max_bytes`]/[`dynamic_max_bytes`] cap a wrapped callback at
//! a maximum.

use crate::core::{Callback, Continue, Resolved};
use crate::error::ErrorKind;
use bytes::{Bytes, BytesMut};

/// Ensures `wrapped` never sees fewer than `minimum` bytes on a single
/// delivery: chunks are accumulated into an internal buffer until the
/// minimum is met, then handed to `wrapped` in one call. A chunk that
/// already meets the minimum at activation is forwarded directly, with no
/// buffering at all.
///
/// The merged buffer is forwarded as an ordinary owned [`Bytes`]: whatever
/// suffix `wrapped` doesn't consume comes back as its own remaining bytes,
/// same as any other callback.
pub fn min_bytes<In, Out, W>(wrapped: W, minimum: usize) -> impl FnOnce(In, Bytes) -> Resolved<Out>
where
    In: 'static,
    Out: 'static,
    W: Callback<In, Out = Out> + 'static,
{
    move |input, bytes| {
        if bytes.len() >= minimum {
            return wrapped.activate(input, bytes);
        }
        min_bytes_accumulate(wrapped, input, minimum, BytesMut::new(), bytes)
    }
}

fn min_bytes_accumulate<In, Out, W>(
    wrapped: W,
    input: In,
    minimum: usize,
    mut buffered: BytesMut,
    bytes: Bytes,
) -> Resolved<Out>
where
    In: 'static,
    Out: 'static,
    W: Callback<In, Out = Out> + 'static,
{
    buffered.extend_from_slice(&bytes);
    if buffered.len() >= minimum {
        return wrapped.activate(input, buffered.freeze());
    }
    Resolved::Incomplete(Continue::new(move |bytes| {
        if bytes.is_empty() {
            return Resolved::Error(
                ErrorKind::ParseError,
                format!(
                    "min-bytes: reached end of stream with only {} of {minimum} bytes",
                    buffered.len()
                ),
            );
        }
        min_bytes_accumulate(wrapped, input, minimum, buffered, bytes)
    }))
}

/// Delivers at most `maximum` bytes total to `wrapped`, however many chunks
/// it takes to get there. A chunk that would exceed the cap is split: the
/// prefix goes to `wrapped`, the suffix is held back and spliced onto the
/// front of whatever `wrapped` eventually leaves unconsumed. If `wrapped`
/// is still incomplete after receiving exactly `maximum` bytes, it is
/// probed with an empty-bytes end-of-stream; a success still gets the
/// held-back suffix spliced in, an error propagates unchanged.
pub fn max_bytes<In, Out, W>(wrapped: W, maximum: usize) -> impl FnOnce(In, Bytes) -> Resolved<Out>
where
    In: 'static,
    Out: 'static,
    W: Callback<In, Out = Out> + 'static,
{
    move |input, bytes| max_bytes_activate(wrapped, input, bytes, maximum)
}

/// As [`max_bytes`], but the ceiling is read from the input rather than
/// fixed at construction: the input is a pair whose first element is the
/// maximum and whose second element is the value forwarded to `wrapped`.
/// This is how length-delimited wire formats (a length prefix followed by
/// exactly that many bytes of payload) are expressed on top of the fixed
/// form.
pub fn dynamic_max_bytes<In, Out, W>(
    wrapped: W,
) -> impl FnOnce((usize, In), Bytes) -> Resolved<Out>
where
    In: 'static,
    Out: 'static,
    W: Callback<In, Out = Out> + 'static,
{
    move |(maximum, input), bytes| max_bytes_activate(wrapped, input, bytes, maximum)
}

fn max_bytes_activate<In, Out, W>(wrapped: W, input: In, bytes: Bytes, maximum: usize) -> Resolved<Out>
where
    In: 'static,
    Out: 'static,
    W: Callback<In, Out = Out> + 'static,
{
    if bytes.len() <= maximum {
        let processed = bytes.len();
        let resolved = wrapped.activate(input, bytes);
        max_bytes_react(resolved, processed, maximum, Bytes::new())
    } else {
        let mut bytes = bytes;
        let chunk = bytes.split_to(maximum);
        let leftover = bytes;
        let resolved = wrapped.activate(input, chunk);
        max_bytes_react(resolved, maximum, maximum, leftover)
    }
}

fn max_bytes_resume<Out>(cont: Continue<Out>, bytes: Bytes, processed: usize, maximum: usize) -> Resolved<Out>
where
    Out: 'static,
{
    if processed + bytes.len() <= maximum {
        let processed = processed + bytes.len();
        max_bytes_react(cont.resume(bytes), processed, maximum, Bytes::new())
    } else {
        let mut bytes = bytes;
        let chunk = bytes.split_to(maximum - processed);
        let leftover = bytes;
        max_bytes_react(cont.resume(chunk), maximum, maximum, leftover)
    }
}

fn max_bytes_react<Out>(resolved: Resolved<Out>, processed: usize, maximum: usize, leftover: Bytes) -> Resolved<Out>
where
    Out: 'static,
{
    match resolved {
        Resolved::Success(value, rest) => Resolved::Success(value, splice(rest, leftover)),
        Resolved::Error(kind, message) => Resolved::Error(kind, message),
        Resolved::Incomplete(cont) => {
            if processed < maximum {
                Resolved::Incomplete(Continue::new(move |bytes| {
                    max_bytes_resume(cont, bytes, processed, maximum)
                }))
            } else {
                crate::trace::event("max-bytes", "cap reached, probing wrapped with eof");
                max_bytes_react(cont.resume(Bytes::new()), processed, maximum, leftover)
            }
        }
    }
}

/// Joins what `wrapped` left unconsumed with the suffix `max_bytes` split
/// off earlier. The two are not guaranteed to be adjacent slices of the
/// same original chunk, so this copies rather than assuming contiguity.
fn splice(rest: Bytes, leftover: Bytes) -> Bytes {
    if leftover.is_empty() {
        return rest;
    }
    if rest.is_empty() {
        return leftover;
    }
    let mut combined = BytesMut::with_capacity(rest.len() + leftover.len());
    combined.extend_from_slice(&rest);
    combined.extend_from_slice(&leftover);
    combined.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::leaf::{eof, fixed, pure};
    use crate::sequence::compose;

    fn read_u32_le(input: (), bytes: Bytes) -> Resolved<u32> {
        compose(
            fixed(4),
            pure(|view: Bytes| {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(&view);
                Some(u32::from_le_bytes(buf))
            }),
        )
        .activate(input, bytes)
    }

    fn read_u8<T: 'static>(_input: T, bytes: Bytes) -> Resolved<u8> {
        fixed(1)
            .activate((), bytes)
            .and_then(|view, rest| Resolved::Success(view[0], rest))
    }

    #[test]
    fn min_bytes_forwards_directly_when_already_enough() {
        let resolved = min_bytes(fixed(2), 2).activate((), Bytes::from_static(b"abcd"));
        match resolved {
            Resolved::Success(view, rest) => {
                assert_eq!(view, Bytes::from_static(b"ab"));
                assert_eq!(rest, Bytes::from_static(b"cd"));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn min_bytes_buffers_until_minimum_then_forwards_in_one_call() {
        let resolved = min_bytes(fixed(4), 4).activate((), Bytes::from_static(b"ab"));
        let resolved = match resolved {
            Resolved::Incomplete(cont) => cont.resume(Bytes::from_static(b"cd")),
            _ => panic!("expected incomplete"),
        };
        match resolved {
            Resolved::Success(view, rest) => {
                assert_eq!(view, Bytes::from_static(b"abcd"));
                assert!(rest.is_empty());
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn min_bytes_eof_before_minimum_is_parse_error() {
        let resolved = min_bytes(fixed(4), 4).activate((), Bytes::from_static(b"ab"));
        let resolved = match resolved {
            Resolved::Incomplete(cont) => cont.resume(Bytes::new()),
            _ => panic!("expected incomplete"),
        };
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    /// `max_bytes(read_u32_le, 4)` on `0x01 0x00 0x00 0x00 0xFF`: the cap
    /// leaves the trailing `0xFF` for whatever is composed after it.
    #[test]
    fn max_bytes_caps_wrapped_and_splices_leftover() {
        let bytes = Bytes::from_static(&[0x01, 0x00, 0x00, 0x00, 0xFF]);
        let resolved = max_bytes(read_u32_le, 4).activate((), bytes);
        match resolved {
            Resolved::Success(value, rest) => {
                assert_eq!(value, 1);
                assert_eq!(rest, Bytes::from_static(&[0xFF]));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn max_bytes_splice_feeds_the_next_composed_callback() {
        let bytes = Bytes::from_static(&[0x01, 0x00, 0x00, 0x00, 0xFF]);
        let resolved = compose(max_bytes(read_u32_le, 4), read_u8).activate((), bytes);
        match resolved {
            Resolved::Success(value, rest) => {
                assert_eq!(value, 0xFF);
                assert!(rest.is_empty());
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn max_bytes_probes_wrapped_with_eof_once_cap_reached_and_succeeds() {
        let resolved = max_bytes(eof, 0).activate(7u32, Bytes::from_static(b"abc"));
        match resolved {
            Resolved::Success(value, rest) => {
                assert_eq!(value, 7);
                assert_eq!(rest, Bytes::from_static(b"abc"));
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn max_bytes_probe_error_propagates() {
        let resolved = max_bytes(fixed(1), 0).activate((), Bytes::from_static(b"x"));
        assert!(matches!(resolved, Resolved::Error(ErrorKind::ParseError, _)));
    }

    #[test]
    fn dynamic_max_bytes_reads_ceiling_from_input() {
        let resolved =
            dynamic_max_bytes(fixed(2)).activate((2usize, ()), Bytes::from_static(b"abXY"));
        match resolved {
            Resolved::Success(view, rest) => {
                assert_eq!(view, Bytes::from_static(b"ab"));
                assert_eq!(rest, Bytes::from_static(b"XY"));
            }
            _ => panic!("expected success"),
        }
    }
}
