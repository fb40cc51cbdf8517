pub mod questions;
pub mod result;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::shuffle::permutation;

pub use result::{FeedbackTier, QuizResult};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Index of the correct option in `options` (canonical order).
    pub answer: usize,
}

impl Question {
    pub fn new(text: String, options: Vec<String>, answer: usize) -> Self {
        Self {
            text,
            options,
            answer,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if self.options.len() < 2 {
            format!("needs at least 2 options, has {}", self.options.len())
        } else if self.answer >= self.options.len() {
            format!(
                "answer {} is out of range for {} options",
                self.answer,
                self.options.len()
            )
        } else {
            return Ok(());
        };
        Err(Error::InvalidQuestion {
            prompt: self.text.clone(),
            reason,
        })
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }
}

/// The one answer given to a question in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AnswerRecord {
    /// Catalog index of the question.
    pub question: usize,
    /// Canonical index of the chosen option.
    pub chosen_option: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IncorrectAnswer {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RunStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOptions {
    pub randomize_questions: bool,
    pub randomize_options: bool,
    /// Keep the previous run's question order ("retry same set").
    pub reuse_order: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            randomize_questions: true,
            randomize_options: false,
            reuse_order: false,
        }
    }
}

#[derive(Debug, Clone)]
struct RunQuestion {
    question: usize,
    /// `display[i]` is the canonical option shown at position `i`.
    display: Vec<usize>,
    answer: Option<AnswerRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OptionMark {
    None,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<OptionView>,
    pub answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SidebarRow {
    pub text: String,
    pub active: bool,
    pub answered: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuizView {
    pub status: RunStatus,
    pub counter: String,
    pub progress_percent: u8,
    pub score: u32,
    pub question: Option<QuestionView>,
    pub can_go_back: bool,
    pub can_advance: bool,
    pub sidebar: Vec<SidebarRow>,
}

/// A multiple-choice quiz over a fixed question catalog.
///
/// Each `start` throws the previous run away: new question order, new option
/// orders, score back to 0, no answers.
pub struct Quiz<R = StdRng> {
    catalog: Vec<Question>,
    run: Vec<RunQuestion>,
    cursor: Cursor,
    /// Furthest position visited in this run.
    reached: usize,
    score: u32,
    incorrect: Vec<IncorrectAnswer>,
    status: RunStatus,
    options: StartOptions,
    rng: R,
}

impl Quiz<StdRng> {
    pub fn new(catalog: Vec<Question>, options: StartOptions) -> Result<Self> {
        Self::with_rng(catalog, options, StdRng::from_entropy())
    }
}

impl<R: Rng> Quiz<R> {
    /// Checks every question, then starts a first run with `options`.
    pub fn with_rng(catalog: Vec<Question>, options: StartOptions, rng: R) -> Result<Self> {
        for question in &catalog {
            question.validate()?;
        }
        let mut quiz = Self {
            cursor: Cursor::new(0),
            catalog,
            run: Vec::new(),
            reached: 0,
            score: 0,
            incorrect: Vec::new(),
            status: RunStatus::InProgress,
            options,
            rng,
        };
        quiz.start(options);
        Ok(quiz)
    }

    pub fn start(&mut self, options: StartOptions) {
        let order: Vec<usize> = if options.reuse_order && !self.run.is_empty() {
            self.run.iter().map(|q| q.question).collect()
        } else if options.randomize_questions {
            permutation(self.catalog.len(), &mut self.rng)
        } else {
            (0..self.catalog.len()).collect()
        };

        self.run = order
            .into_iter()
            .map(|question| {
                let len = self.catalog[question].options.len();
                let display = if options.randomize_options {
                    permutation(len, &mut self.rng)
                } else {
                    (0..len).collect()
                };
                RunQuestion {
                    question,
                    display,
                    answer: None,
                }
            })
            .collect();

        self.cursor.reset(self.run.len());
        self.reached = 0;
        self.score = 0;
        self.incorrect.clear();
        self.status = if self.run.is_empty() {
            RunStatus::Completed
        } else {
            RunStatus::InProgress
        };
        self.options = options;
        log::info!(
            "Started quiz run with {} questions ({:?})",
            self.run.len(),
            options
        );
    }

    /// New question order, same option randomization as the last run.
    pub fn restart(&mut self) {
        self.start(StartOptions {
            randomize_questions: true,
            randomize_options: self.options.randomize_options,
            reuse_order: false,
        });
    }

    /// Same question order as the last run.
    pub fn retry(&mut self) {
        self.start(StartOptions {
            reuse_order: true,
            ..self.options
        });
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.run.len()
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor.position()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current().map(|q| &self.catalog[q.question])
    }

    /// Options of the current question, in display order.
    pub fn displayed_options(&self) -> Vec<&str> {
        match self.current() {
            Some(q) => self.display_texts(q),
            None => Vec::new(),
        }
    }

    pub fn answer_at(&self, position: usize) -> Option<&AnswerRecord> {
        self.run.get(position).and_then(|q| q.answer.as_ref())
    }

    pub fn answers(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.run.iter().filter_map(|q| q.answer.as_ref())
    }

    pub fn incorrect_answers(&self) -> &[IncorrectAnswer] {
        &self.incorrect
    }

    /// Answers the current question with the option shown at `display_index`.
    /// A question takes exactly one answer per run.
    pub fn submit_answer(&mut self, display_index: usize) -> Result<AnswerRecord> {
        let position = self.active_position()?;
        let entry = &mut self.run[position];
        if entry.answer.is_some() {
            log::debug!("Question {} already answered, ignoring", position);
            return Err(Error::AlreadyAnswered { position });
        }
        let chosen_option = *entry.display.get(display_index).ok_or(Error::OutOfRange {
            index: display_index,
            len: entry.display.len(),
        })?;

        let question = &self.catalog[entry.question];
        let is_correct = chosen_option == question.answer;
        let record = AnswerRecord {
            question: entry.question,
            chosen_option,
            is_correct,
        };
        entry.answer = Some(record);

        if is_correct {
            self.score += 1;
        } else {
            self.incorrect.push(IncorrectAnswer {
                question: question.text.clone(),
                your_answer: question.options[chosen_option].clone(),
                correct_answer: question.correct_option().to_string(),
            });
        }
        log::debug!(
            "Answered question {} with option {}: {}",
            position,
            chosen_option,
            if is_correct { "correct" } else { "incorrect" }
        );
        Ok(record)
    }

    /// Moves past an answered question; past the last one the run completes.
    pub fn advance(&mut self) -> Result<RunStatus> {
        let position = self.active_position()?;
        if self.run[position].answer.is_none() {
            return Err(Error::Unanswered { position });
        }
        if self.cursor.is_last() {
            self.status = RunStatus::Completed;
            log::info!("Quiz completed: {}/{}", self.score, self.run.len());
        } else {
            self.cursor.next();
            self.reached = self.reached.max(position + 1);
        }
        Ok(self.status)
    }

    /// Steps back to the previous question. Answers stay as given.
    pub fn previous(&mut self) -> bool {
        self.status == RunStatus::InProgress && self.cursor.prev()
    }

    /// Goes to any question already reached in this run.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if self.status == RunStatus::Completed {
            return Err(Error::RunCompleted);
        }
        if index >= self.run.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.run.len(),
            });
        }
        if index > self.reached {
            return Err(Error::Unreached { index });
        }
        self.cursor.jump_to(index)
    }

    pub fn result(&self) -> Result<QuizResult> {
        if self.status != RunStatus::Completed {
            return Err(Error::NotCompleted);
        }
        Ok(QuizResult::new(self.score, self.run.len() as u32))
    }

    pub fn view(&self) -> QuizView {
        let position = self.cursor.position();
        let in_progress = self.status == RunStatus::InProgress;
        let question = if in_progress {
            self.current().map(|q| self.question_view(q))
        } else {
            None
        };
        let can_advance = in_progress && self.current().is_some_and(|q| q.answer.is_some());

        QuizView {
            status: self.status,
            counter: self.cursor.label(),
            progress_percent: self.cursor.progress_percent(),
            score: self.score,
            question,
            can_go_back: in_progress && self.cursor.can_go_back(),
            can_advance,
            sidebar: self
                .run
                .iter()
                .enumerate()
                .map(|(i, q)| SidebarRow {
                    text: self.catalog[q.question].text.clone(),
                    active: Some(i) == position,
                    answered: q.answer.is_some(),
                    options: self.display_texts(q).into_iter().map(String::from).collect(),
                })
                .collect(),
        }
    }

    fn current(&self) -> Option<&RunQuestion> {
        self.cursor.position().and_then(|p| self.run.get(p))
    }

    fn active_position(&self) -> Result<usize> {
        match (self.status, self.cursor.position()) {
            (RunStatus::InProgress, Some(position)) => Ok(position),
            _ => Err(Error::RunCompleted),
        }
    }

    fn display_texts(&self, q: &RunQuestion) -> Vec<&str> {
        let question = &self.catalog[q.question];
        q.display
            .iter()
            .map(|&option| question.options[option].as_str())
            .collect()
    }

    fn question_view(&self, q: &RunQuestion) -> QuestionView {
        let question = &self.catalog[q.question];
        let options = q
            .display
            .iter()
            .map(|&option| {
                let selected = q.answer.is_some_and(|a| a.chosen_option == option);
                let mark = match q.answer {
                    Some(_) if option == question.answer => OptionMark::Correct,
                    Some(_) if selected => OptionMark::Incorrect,
                    _ => OptionMark::None,
                };
                OptionView {
                    text: question.options[option].clone(),
                    selected,
                    mark,
                }
            })
            .collect();

        QuestionView {
            text: question.text.clone(),
            options,
            answered: q.answer.is_some(),
        }
    }
}
