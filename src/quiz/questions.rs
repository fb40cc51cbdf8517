use std::path::Path;

use crate::catalog::load_json;
use crate::error::Result;
use crate::quiz::Question;

const QUESTIONS: [(&str, [&str; 4], usize); 10] = [
    (
        "CPU stands for?",
        [
            "Central Processing Unit",
            "Computer Personal Unit",
            "Core Processing Unit",
            "Central Program Unit",
        ],
        0,
    ),
    ("Mother of all languages?", ["Python", "C", "Java", "Assembly"], 1),
    (
        "Purpose of variable?",
        ["Store data", "Compile code", "Display output", "Debug errors"],
        0,
    ),
    (
        "HTML stands for?",
        [
            "HyperText Markup Language",
            "HighText Machine Language",
            "HyperTool Multi Language",
            "HomeText Markup Language",
        ],
        0,
    ),
    ("Which uses LIFO?", ["Queue", "Stack", "Array", "List"], 1),
    ("Algorithm means?", ["Language", "Step process", "Database", "Hardware"], 1),
    (
        "Use of loop?",
        ["Store data", "Repeat code", "Compile code", "Define func"],
        1,
    ),
    ("Array index starts at?", ["0", "1", "-1", "Depends"], 0),
    ("Binary of 5?", ["101", "110", "100", "111"], 0),
    (
        "CSS stands for?",
        [
            "Creative Style Sys",
            "Cascading Style Sheets",
            "Comp Style Syntax",
            "Code Style Struct",
        ],
        1,
    ),
];

pub fn builtin_questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .map(|(text, options, answer)| {
            Question::new(
                text.to_string(),
                options.iter().map(|o| o.to_string()).collect(),
                *answer,
            )
        })
        .collect()
}

/// Loads a JSON question catalog, rejecting malformed questions.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>> {
    let questions: Vec<Question> = load_json(path)?;
    for question in &questions {
        question.validate()?;
    }
    Ok(questions)
}
