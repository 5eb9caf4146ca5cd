pub mod types;

pub use types::{Dictionary, PLACEHOLDER, Translation};
