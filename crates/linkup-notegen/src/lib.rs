mod error;
mod generator;

pub use error::{Error, Result};
pub use generator::{NoteGenerator, OllamaGenerator};
