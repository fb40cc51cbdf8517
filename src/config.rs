use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::{builtin_flashcards, builtin_songs, load_json, Flashcard, Song};
use crate::error::{Error, Result};
use crate::flashcards::DEFAULT_FLIP_TRANSITION;
use crate::quiz::questions::{builtin_questions, load_questions};
use crate::quiz::Question;

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub flip_transition: Duration,
    pub randomize_options: bool,
    pub shuffle_on_start: bool,
    pub flashcards_path: Option<PathBuf>,
    pub songs_path: Option<PathBuf>,
    pub questions_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flip_transition: DEFAULT_FLIP_TRANSITION,
            randomize_options: false,
            shuffle_on_start: false,
            flashcards_path: None,
            songs_path: None,
            questions_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let flip_transition = match parse::<u64>(&lookup, "FLIP_TRANSITION_MS")? {
            Some(ms) => Duration::from_millis(ms),
            None => defaults.flip_transition,
        };

        Ok(Self {
            flip_transition,
            randomize_options: parse_flag(&lookup, "QUIZ_RANDOMIZE_OPTIONS")?
                .unwrap_or(defaults.randomize_options),
            shuffle_on_start: parse_flag(&lookup, "SHUFFLE_ON_START")?
                .unwrap_or(defaults.shuffle_on_start),
            flashcards_path: lookup("FLASHCARDS_PATH").map(PathBuf::from),
            songs_path: lookup("SONGS_PATH").map(PathBuf::from),
            questions_path: lookup("QUESTIONS_PATH").map(PathBuf::from),
        })
    }

    pub fn flashcards(&self) -> Result<Vec<Flashcard>> {
        match &self.flashcards_path {
            Some(path) => load_json(path),
            None => Ok(builtin_flashcards()),
        }
    }

    pub fn songs(&self) -> Result<Vec<Song>> {
        match &self.songs_path {
            Some(path) => load_json(path),
            None => Ok(builtin_songs()),
        }
    }

    pub fn questions(&self) -> Result<Vec<Question>> {
        match &self.questions_path {
            Some(path) => load_questions(path),
            None => Ok(builtin_questions()),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    match lookup(key) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::Config {
                key: key.to_string(),
                value,
            }),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.flip_transition, Duration::from_millis(400));
        assert_eq!(settings.questions().unwrap().len(), 10);
    }

    #[test]
    fn reads_values() {
        let settings = Settings::from_lookup(lookup(&[
            ("FLIP_TRANSITION_MS", "250"),
            ("QUIZ_RANDOMIZE_OPTIONS", "yes"),
            ("SHUFFLE_ON_START", "0"),
            ("SONGS_PATH", "/tmp/songs.json"),
        ]))
        .unwrap();
        assert_eq!(settings.flip_transition, Duration::from_millis(250));
        assert!(settings.randomize_options);
        assert!(!settings.shuffle_on_start);
        assert_eq!(settings.songs_path, Some(PathBuf::from("/tmp/songs.json")));
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = Settings::from_lookup(lookup(&[("FLIP_TRANSITION_MS", "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config { key, .. } if key == "FLIP_TRANSITION_MS"));
        assert!(Settings::from_lookup(lookup(&[("SHUFFLE_ON_START", "maybe")])).is_err());
    }
}
