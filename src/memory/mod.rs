//! Assistant conversation memory
//!
//! Holds the per-session chat transcript shown in the assistant tab.

pub mod store;

pub use store::{welcome_text, Transcript};
