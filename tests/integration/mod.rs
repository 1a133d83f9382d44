//! Integration test modules for MonoSlide
//!
//! - engine: Lifecycle, activation, builder validation
//! - slide: Held-note scenarios and slide timing across blocks
//! - routing: Passthrough, all-notes-off, output capacity
//! - properties: Randomized event streams

pub mod properties;
pub mod slide;
