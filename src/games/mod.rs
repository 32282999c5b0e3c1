//! The games implemented in this crate.
pub mod uttt;
