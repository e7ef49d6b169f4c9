//! Streaming decoder for binary execution traces.
//!
//! This crate provides:
//!
//! - [`Parser`]: validates the 16-byte stream header and decodes one event
//!   record per call into a reusable [`Event`](gotrace_core::Event)
//! - [`Events`]: iterator adapter yielding owned events
//! - [`varint`]: the base-128 varint reader shared by every record field
//!
//! # Decoding a trace
//!
//! ```no_run
//! use gotrace_core::Event;
//! use gotrace_parser::Parser;
//!
//! let mut parser = Parser::new(std::io::stdin().lock())?;
//! let mut event = Event::new();
//! while parser.parse(&mut event)? {
//!     if let Some(info) = event.info() {
//!         println!("{}: {}", info.name, info.description);
//!     }
//! }
//! # Ok::<(), gotrace_core::Error>(())
//! ```

mod events;
mod parser;
pub mod varint;

pub use events::Events;
pub use parser::{Parser, DEFAULT_BUFFER_CAPACITY, HEADER, HEADER_LEN};
