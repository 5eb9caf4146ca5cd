pub mod dictionary;
pub mod error;
pub mod language;
pub mod merge;
pub mod normalize;
pub mod schedule;

pub use podlex_types::{Dictionary, PLACEHOLDER, Translation};
