//! SSE wire parsing.
//!
//! Parsing happens in two steps, following the
//! [HTML Living Standard](https://html.spec.whatwg.org/multipage/server-sent-events.html)
//! framing rules:
//!
//! 1. [`FrameParser`] buffers raw bytes and cuts them into blank-line
//!    terminated frames, whatever the chunk boundaries of the network reads.
//! 2. [`parse_frame`] turns one frame into a [`ParsedEvent`].

pub(crate) mod constants;
pub mod event;
pub mod field;
pub mod frame;

pub use event::ParsedEvent;
pub use field::parse_frame;
pub use frame::FrameParser;
