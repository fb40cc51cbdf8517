use std::io::{self, BufRead, Write};
use std::time::Instant;

use dotenv::dotenv;
use log::debug;
use study_deck::catalog::Song;
use study_deck::config::Settings;
use study_deck::flashcards::FlashcardDeck;
use study_deck::playlist::{Player, Playlist};
use study_deck::quiz::{OptionMark, Quiz, RunStatus, StartOptions};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type StateResult = Result<State, Box<dyn std::error::Error + Send + Sync>>;

enum State {
    Menu,
    Flashcards(FlashcardDeck),
    Playlist(Playlist<ConsolePlayer>),
    Quiz(Quiz),
    Quit,
}

/// Stands in for an audio backend: it only reports what it would do.
struct ConsolePlayer;

impl Player for ConsolePlayer {
    fn play(&mut self, song: &Song) -> Result<(), String> {
        println!("♪ Now playing {} ({})", song.title, song.source);
        Ok(())
    }

    fn stop(&mut self, song: &Song) {
        println!("■ Stopped {}", song.title);
    }
}

const MENU_TEXT: &str = "Pick a widget: flashcards | playlist | quiz | quit";
const FLASHCARD_HELP: &str = "Commands: flip, next, prev, go N, shuffle, menu";
const PLAYLIST_HELP: &str = "Commands: play N, next, prev, end, stop, shuffle, menu";
const QUIZ_HELP: &str = concat!(
    "Commands: answer N, advance, back, go N, start [ordered] [options] [same], ",
    "retry, restart, review, menu"
);

fn main() -> HandlerResult {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting study deck...");

    let settings = Settings::from_env()?;
    debug!("Settings: {:?}", settings);

    let stdin = io::stdin();
    let mut state = State::Menu;
    println!("{}", MENU_TEXT);
    prompt()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        state = match state {
            State::Menu => choose_widget(&settings, &words)?,
            State::Flashcards(deck) => flashcards(deck, &words)?,
            State::Playlist(playlist) => playlist_commands(playlist, &words)?,
            State::Quiz(quiz) => quiz_commands(quiz, &words)?,
            State::Quit => State::Quit,
        };
        if let State::Quit = state {
            break;
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> HandlerResult {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn index_arg(words: &[&str]) -> Option<usize> {
    words
        .get(1)
        .and_then(|w| w.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
}

fn choose_widget(settings: &Settings, words: &[&str]) -> StateResult {
    let state = match words.first().copied() {
        Some("flashcards") => {
            let mut deck = FlashcardDeck::new(settings.flashcards()?, settings.flip_transition);
            if settings.shuffle_on_start {
                deck.shuffle();
            }
            println!("{}", FLASHCARD_HELP);
            show_card(&deck);
            State::Flashcards(deck)
        }
        Some("playlist") => {
            let mut playlist = Playlist::new(settings.songs()?, ConsolePlayer);
            if settings.shuffle_on_start {
                playlist.shuffle();
            }
            println!("{}", PLAYLIST_HELP);
            show_playlist(&playlist);
            State::Playlist(playlist)
        }
        Some("quiz") => {
            let quiz = Quiz::new(
                settings.questions()?,
                StartOptions {
                    randomize_options: settings.randomize_options,
                    ..StartOptions::default()
                },
            )?;
            println!("{}", QUIZ_HELP);
            show_question(&quiz);
            State::Quiz(quiz)
        }
        Some("quit") => State::Quit,
        _ => {
            println!("{}", MENU_TEXT);
            State::Menu
        }
    };
    Ok(state)
}

fn flashcards(mut deck: FlashcardDeck, words: &[&str]) -> StateResult {
    match words.first().copied() {
        Some("flip") => {
            if !deck.toggle_reveal(Instant::now()) {
                println!("(still flipping)");
            }
        }
        Some("next") => {
            deck.next();
        }
        Some("prev") => {
            deck.prev();
        }
        Some("go") => match index_arg(words) {
            Some(index) => {
                if let Err(err) = deck.select(index) {
                    println!("{}", err);
                }
            }
            None => println!("Usage: go N"),
        },
        Some("shuffle") => deck.shuffle(),
        Some("menu") => return back_to_menu(),
        _ => println!("{}", FLASHCARD_HELP),
    }
    show_card(&deck);
    Ok(State::Flashcards(deck))
}

fn show_card(deck: &FlashcardDeck) {
    let view = deck.view();
    if view.revealed {
        println!("[{}] {}\n    -> {}", view.counter, view.prompt, view.reveal);
    } else {
        println!("[{}] {}", view.counter, view.prompt);
    }
}

fn playlist_commands(mut playlist: Playlist<ConsolePlayer>, words: &[&str]) -> StateResult {
    // Playback failures are already reflected in the playlist's status line.
    let outcome = match words.first().copied() {
        Some("play") => match index_arg(words) {
            Some(index) => playlist.select(index),
            None => {
                println!("Usage: play N");
                Ok(())
            }
        },
        Some("next") => playlist.next(),
        Some("prev") => playlist.prev(),
        Some("end") => playlist.notify_playback_ended(),
        Some("stop") => {
            playlist.stop();
            Ok(())
        }
        Some("shuffle") => {
            playlist.shuffle();
            Ok(())
        }
        Some("menu") => {
            playlist.stop();
            return back_to_menu();
        }
        _ => {
            println!("{}", PLAYLIST_HELP);
            Ok(())
        }
    };
    if let Err(err) = outcome {
        debug!("Playlist command rejected: {}", err);
    }
    show_playlist(&playlist);
    Ok(State::Playlist(playlist))
}

fn show_playlist(playlist: &Playlist<ConsolePlayer>) {
    let view = playlist.view();
    for (i, row) in view.rows.iter().enumerate() {
        let marker = if row.active { '*' } else { ' ' };
        println!("{} {}. {} [{}]", marker, i + 1, row.title, row.button);
    }
    println!("{}", view.now_playing);
    if let Some(status) = view.status {
        println!("{}", status);
    }
}

fn quiz_commands(mut quiz: Quiz, words: &[&str]) -> StateResult {
    match words.first().copied() {
        Some("answer") => match index_arg(words) {
            Some(index) => match quiz.submit_answer(index) {
                Ok(record) if record.is_correct => println!("Correct!"),
                Ok(_) => println!("Incorrect."),
                Err(err) => println!("{}", err),
            },
            None => println!("Usage: answer N"),
        },
        Some("advance") => match quiz.advance() {
            Ok(RunStatus::Completed) => {
                show_result(&quiz);
                return Ok(State::Quiz(quiz));
            }
            Ok(RunStatus::InProgress) => {}
            Err(err) => println!("{}", err),
        },
        Some("back") => {
            quiz.previous();
        }
        Some("go") => match index_arg(words) {
            Some(index) => {
                if let Err(err) = quiz.jump_to(index) {
                    println!("{}", err);
                }
            }
            None => println!("Usage: go N"),
        },
        Some("start") => quiz.start(StartOptions {
            randomize_questions: !words.contains(&"ordered"),
            randomize_options: words.contains(&"options"),
            reuse_order: words.contains(&"same"),
        }),
        Some("retry") => quiz.retry(),
        Some("restart") => quiz.restart(),
        Some("review") => {
            review(&quiz);
            return Ok(State::Quiz(quiz));
        }
        Some("menu") => return back_to_menu(),
        _ => println!("{}", QUIZ_HELP),
    }
    show_question(&quiz);
    Ok(State::Quiz(quiz))
}

fn show_question(quiz: &Quiz) {
    let view = quiz.view();
    let Some(question) = view.question else {
        show_result(quiz);
        return;
    };
    println!("[{}] {}", view.counter, question.text);
    for (i, option) in question.options.iter().enumerate() {
        let mark = match option.mark {
            OptionMark::Correct => " ✓",
            OptionMark::Incorrect => " ✗",
            OptionMark::None => "",
        };
        println!("  {}. {}{}", i + 1, option.text, mark);
    }
}

fn show_result(quiz: &Quiz) {
    if let Ok(result) = quiz.result() {
        println!("{}", result);
        println!("[{}] {}", result.tier.as_str(), result.tier.message());
        println!("Type 'review', 'retry', 'restart' or 'menu'.");
    }
}

fn review(quiz: &Quiz) {
    let incorrect = quiz.incorrect_answers();
    if incorrect.is_empty() {
        println!("You got all questions correct! Amazing!");
        return;
    }
    println!("Questions you got wrong:");
    for item in incorrect {
        println!("{}", item.question);
        println!("  Your Answer: {}", item.your_answer);
        println!("  Correct Answer: {}", item.correct_answer);
    }
}

fn back_to_menu() -> StateResult {
    println!("{}", MENU_TEXT);
    Ok(State::Menu)
}
