pub mod catalog;
pub mod config;
pub mod cursor;
pub mod error;
pub mod flashcards;
pub mod playlist;
pub mod quiz;
pub mod shuffle;

pub use error::{Error, Result};
