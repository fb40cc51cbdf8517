use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Flashcard {
    pub prompt: String,
    pub reveal: String,
}

impl Flashcard {
    pub fn new(prompt: impl Into<String>, reveal: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reveal: reveal.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Song {
    pub title: String,
    /// Opaque handle handed to the playback collaborator (a file path or URL).
    pub source: String,
}

impl Song {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
        }
    }
}

/// Reads a JSON array of catalog items from `path`.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let file = File::open(path.as_ref())?;
    let items: Vec<T> = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("Loaded {} items from {}", items.len(), path.as_ref().display());
    Ok(items)
}

const FLASHCARDS: [(&str, &str); 10] = [
    ("What does CPU stand for?", "Central Processing Unit"),
    ("What is the role of a variable in programming?", "Stores and manages data"),
    ("What is the purpose of HTML?", "Defines the structure of web content"),
    ("What is the function of a loop in programming?", "Executes code repeatedly"),
    ("What defines an algorithm?", "A sequence of steps to solve a problem"),
    ("What is the role of CSS in web development?", "Controls the visual style of web pages"),
    ("What is a Boolean value?", "Represents true or false"),
    ("What is the purpose of an if statement?", "Evaluates conditions for decision-making"),
    ("What is a function in programming?", "A reusable block of code for specific tasks"),
    ("What is the goal of debugging?", "Identifies and corrects code errors"),
];

pub fn builtin_flashcards() -> Vec<Flashcard> {
    FLASHCARDS
        .iter()
        .map(|(prompt, reveal)| Flashcard::new(*prompt, *reveal))
        .collect()
}

pub fn builtin_songs() -> Vec<Song> {
    (1..=5)
        .map(|n| {
            Song::new(
                format!("Instrumental Track {n}"),
                format!("./songs/song{n}.mp3"),
            )
        })
        .collect()
}
