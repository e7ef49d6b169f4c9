//! Core types for the gotrace decoder.
//!
//! This crate defines the data structures shared by the parser, the analysis
//! tools and the CLI: the decoded [`Event`], the [`EventType`] tag, the static
//! event-type [`catalog`], and the error type. It contains no decoding logic.

pub mod catalog;
pub mod error;
pub mod event;

pub use catalog::{catalog, EventInfo, PayloadShape};
pub use error::{Error, Result};
pub use event::{Event, EventType};
