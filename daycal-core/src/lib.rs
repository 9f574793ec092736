//! Core library for daycal.
//!
//! This crate owns everything between an in-memory [`Event`] and the plain-text
//! files in the calendar directory:
//! - `codec` converts events to and from lines, filenames and file bodies
//! - `order` is the canonical ordering of a day's events
//! - `store` persists days, as one file of lines or one directory of files
//! - `config` locates the calendar directory and holds the category palette

pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod order;
pub mod store;

pub use error::{DaycalError, DaycalResult, ParseError};
pub use event::{ClockTime, Event, EventStart};
pub use store::DayStore;
