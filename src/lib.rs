//! # pushcomb
//!
//! A byte-oriented, push-style parser combinator library.
//!
//! Most parser combinator libraries are *pull* parsers: the parser owns the
//! input and asks for more of it on demand. `pushcomb` runs the other way.
//! The host owns the I/O loop — a socket, a file, whatever produces bytes —
//! and feeds chunks to a [`Driver`] as they arrive. After every chunk the
//! driver reports whether the parse has completed, needs more bytes, or has
//! failed; it never blocks and never reads anything itself.
//!
//! This is the right shape for a parser that has to live inside an event
//! loop, or that is parsing a message that may be split across an arbitrary
//! number of socket reads: there is no parser-side buffering beyond what an
//! individual combinator needs to do its job, and no assumption that a full
//! message is ever available as one contiguous slice.
//!
//! ## The moving parts
//!
//! A [`Callback`] is the unit a combinator builds on: given an input value
//! and the bytes on hand, it resolves to [`Resolved::Success`],
//! [`Resolved::Incomplete`] (handing back a [`Continue`] to resume with the
//! next chunk), or [`Resolved::Error`]. Callbacks compose:
//!
//! - [`sequence::compose`] runs one callback, then feeds its result and
//!   leftover bytes into the next.
//! - [`product`] applies callbacks to the elements of a tuple ([`product::first`],
//!   [`product::second`], [`product::par`]) or fans a single value out to
//!   several callbacks at once ([`product::dup`], [`product::both`]).
//! - [`repeat::fold`] iterates a callback until it refuses the first byte of
//!   an iteration, folding each success into the next input.
//! - [`window`] buffers a minimum before forwarding ([`window::min_bytes`])
//!   or caps a wrapped callback at a maximum, splitting and splicing chunks
//!   as needed ([`window::max_bytes`], [`window::dynamic_max_bytes`]).
//! - [`leaf`] has the terminal callbacks that actually consume bytes:
//!   [`leaf::noop`], [`leaf::skip`], [`leaf::fixed`], [`leaf::eof`],
//!   [`leaf::hwm_string`], [`leaf::pure`].
//!
//! A [`Driver`] owns the top of the tree and mediates between the host and
//! the parse: [`Driver::set_top_callback`] wires in the combinator tree,
//! [`Driver::activate`] starts it, [`Driver::submit`] feeds a chunk,
//! [`Driver::eof`] signals the end of the stream, and [`Driver::result`]
//! hands back the final value.
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use pushcomb::prelude::*;
//! use pushcomb::leaf::{eof, fixed, pure};
//!
//! // Reads a little-endian u32, then requires end-of-stream.
//! fn read_u32_le(input: (), bytes: Bytes) -> Resolved<u32> {
//!     compose(
//!         fixed(4),
//!         pure(|view: Bytes| {
//!             let mut buf = [0u8; 4];
//!             buf.copy_from_slice(&view);
//!             Some(u32::from_le_bytes(buf))
//!         }),
//!     )
//!     .activate(input, bytes)
//! }
//!
//! let mut driver: Driver<(), u32> = Driver::new();
//! driver.set_top_callback(compose(read_u32_le, eof));
//! let status = driver.activate(());
//! assert!(status.is_incomplete());
//! let status = driver.submit(Bytes::from_static(&[1, 0, 0, 0]));
//! assert!(status.is_success());
//! assert_eq!(driver.result(), Some(1));
//! ```
//!
//! ## Scope
//!
//! This crate is the combinator engine only. It has no notion of any
//! particular wire format — building something like a Protocol Buffers
//! decoder on top of it is a matter of writing varint readers, a field-map
//! dispatcher, and wiring them together with [`repeat::fold`] and
//! [`window::dynamic_max_bytes`]; none of that is this crate's concern.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

pub mod core;
pub mod error;
pub mod leaf;
pub mod parser;
pub mod product;
pub mod repeat;
pub mod sequence;
mod trace;
pub mod window;

pub use crate::core::{Callback, Continue, Resolved, Spec};
pub use crate::error::{ErrorKind, Status};
pub use crate::parser::Driver;

/// Glob-importable surface for composing a parser: the core types plus the
/// combinator constructors, without having to name every module.
pub mod prelude {
    pub use crate::core::{Callback, Continue, Resolved, Spec};
    pub use crate::error::{ErrorKind, Status};
    pub use crate::leaf;
    pub use crate::parser::Driver;
    pub use crate::product;
    pub use crate::repeat::fold;
    pub use crate::sequence::compose;
    pub use crate::window;
}
