//! Wall-clock primitives for the appointment book.
//!
//! Everything here is plain calendar arithmetic with no notion of a time
//! zone; a tenant lives in exactly one local timezone and all stored times
//! are local wall-clock values.

mod date;
pub use date::*;
mod week_day;
pub use week_day::*;
mod time_stamp;
pub use time_stamp::*;
mod time_span;
pub use time_span::*;
mod working_duration;
pub use working_duration::*;
