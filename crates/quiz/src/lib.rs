//! Quiz content generation: arithmetic questions by difficulty tier and
//! fraction/decimal word problems for invasion defense.
//!
//! Generators take any `rand::Rng`, so a seeded `StdRng` reproduces the same
//! questions run after run.

pub mod challenge;
pub mod difficulty;
pub mod question;

pub use challenge::*;
pub use difficulty::*;
pub use question::*;
