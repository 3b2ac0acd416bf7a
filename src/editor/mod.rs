//! Incremental expression editing.
//!
//! [`EditBuffer`] owns the expression text and cursor and is the single
//! source of truth for a UI adapter: the adapter feeds it keys or text and
//! reads back the expression and result lines after every event.

mod buffer;
mod keys;

pub use buffer::{CommitOutcome, EditBuffer, Mode};
pub use keys::Key;
