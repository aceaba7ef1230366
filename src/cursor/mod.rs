//! Line-aware cursor over immutable text.
//!
//! Provides a rope-backed read-only buffer, pure boundary/search functions,
//! and a stateful [`Cursor`] that applies a lax or strict failure policy
//! and keeps an optional selection in step with every motion.

mod buffer;
mod error;
mod navigator;
pub mod scan;
mod selection;

pub use buffer::Buffer;
pub use error::{ErrorKind, Motion, NavError};
pub use navigator::{Cursor, Mode};
pub use selection::{Selection, SelectionMode};
