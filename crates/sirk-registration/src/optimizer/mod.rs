//! Optimiser module for tracking the best score per slice.
//!
//! No search is performed here: poses are chosen interactively and the
//! optimiser only decides whether a new score beats the running best.

pub mod running_best;

pub use running_best::Optimiser;
