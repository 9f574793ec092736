//! Text encodings of events.
//!
//! Two on-disk shapes exist: one line per event inside a day file, and one
//! file per event inside a day directory where the filename carries the time
//! and title and the body carries the remaining fields. Everything here is
//! pure; the stores own all I/O.

mod filename;
mod line;

pub use filename::{decode_filename_and_body, encode_body, encode_filename, sanitize_title};
pub use line::{decode_line, encode_line};
