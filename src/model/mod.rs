//! Deck vocabulary: the canonical deck, the raw model output it is
//! normalized from, and the schema the model is asked to follow.

mod deck;
mod raw;
pub mod schema;

pub use deck::{Deck, Slide, SlideBounds};
pub use raw::RawGeneration;
