//! Plain-text front end: renders the active view to stdout and reads one
//! command per line from stdin.
//!
//! The circle trainer's auto-advance is driven from here: while a deadline is
//! pending, a tokio timer races the next stdin line.

use std::fmt;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use services::{
    CardFace, CircleView, FlashcardView, MarkedOption, OptionMark, ProgressionView, StudyServices,
    View,
};
use theory_core::model::format_note;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  scales | circle | progression   switch view (also: view <name>)
  next | prev                     move between cards, or load the next question
  flip                            turn the current card over
  shuffle                         toggle shuffle mode
  restart                         back to the first card
  done                            mark the current scale as learned
  <n> | answer <n|note>           pick an option
  reset                           reset the current view's progress
  reset-all                       clear all saved progress
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(View),
    Next,
    Previous,
    Flip,
    Shuffle,
    Restart,
    Done,
    Answer(String),
    Reset,
    ResetAll,
    Redraw,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl Command {
    pub fn parse(line: &str) -> Result<Self, UnknownCommand> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Redraw,
            "view" => rest
                .parse::<View>()
                .map(Command::Show)
                .map_err(|_| UnknownCommand(line.to_owned()))?,
            "scales" | "s" => Command::Show(View::Scales),
            "circle" | "c" => Command::Show(View::Circle),
            "progression" | "quiz" | "p" => Command::Show(View::Progression),
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "flip" | "f" => Command::Flip,
            "shuffle" => Command::Shuffle,
            "restart" => Command::Restart,
            "done" => Command::Done,
            "answer" | "a" if !rest.is_empty() => Command::Answer(rest.to_owned()),
            "reset" => Command::Reset,
            "reset-all" => Command::ResetAll,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if word.chars().all(|c| c.is_ascii_digit()) && rest.is_empty() => {
                Command::Answer(word.to_owned())
            }
            _ => return Err(UnknownCommand(line.to_owned())),
        };
        Ok(command)
    }
}

/// What the loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Render,
    Note(String),
    Help,
    Quit,
}

fn note(text: impl Into<String>) -> Reply {
    Reply::Note(text.into())
}

/// Run `command` against the active view.
pub fn apply(services: &mut StudyServices, command: Command) -> Reply {
    let view = services.active_view();
    match command {
        Command::Show(target) => {
            services.switch_view(target);
            Reply::Render
        }
        Command::Redraw => Reply::Render,
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
        Command::ResetAll => {
            services.reset_all();
            Reply::Render
        }
        Command::Answer(input) => answer(services, &input),
        Command::Next => match view {
            View::Scales if services.flashcards_mut().next() => Reply::Render,
            View::Scales => note("Already on the last card."),
            View::Circle if services.circle().is_locked() => {
                note("The next question arrives automatically.")
            }
            View::Circle => {
                services.circle_mut().generate_question();
                Reply::Render
            }
            View::Progression => {
                let quiz = services.progression_mut();
                if quiz.current().is_some_and(|active| !active.is_answered()) {
                    return note("Answer the current question first.");
                }
                quiz.next_question();
                Reply::Render
            }
        },
        Command::Previous if view == View::Scales => {
            if services.flashcards_mut().previous() {
                Reply::Render
            } else {
                note("Already on the first card.")
            }
        }
        Command::Flip if view == View::Scales => {
            services.flashcards_mut().flip();
            Reply::Render
        }
        Command::Shuffle if view == View::Scales => {
            services.flashcards_mut().toggle_shuffle();
            Reply::Render
        }
        Command::Restart if view == View::Scales => {
            services.flashcards_mut().restart();
            Reply::Render
        }
        Command::Done if view == View::Scales => {
            if services.flashcards_mut().mark_current_completed() {
                Reply::Render
            } else {
                note("Nothing new to mark.")
            }
        }
        Command::Reset => {
            match view {
                View::Scales => services.flashcards_mut().restart(),
                View::Circle => services.circle_mut().reset(),
                View::Progression => {
                    services.progression_mut().reset();
                }
            }
            Reply::Render
        }
        Command::Previous
        | Command::Flip
        | Command::Shuffle
        | Command::Restart
        | Command::Done => note("That command only works on the scales view."),
    }
}

fn answer(services: &mut StudyServices, input: &str) -> Reply {
    match services.active_view() {
        View::Scales => note("There is nothing to answer on the scales view."),
        View::Circle => {
            let Some(view) = services.circle().view() else {
                return note("No question yet.");
            };
            let Some(choice) = resolve_choice(&view.options, input) else {
                return note(format!("No option matches `{input}`."));
            };
            match services.circle_mut().submit_answer(&choice) {
                Some(_) => Reply::Render,
                None => note("Already answered. Wait for the next question."),
            }
        }
        View::Progression => {
            let ProgressionView::Question { options, .. } = services.progression().view() else {
                return note("No question is waiting for an answer.");
            };
            let Some(choice) = resolve_choice(&options, input) else {
                return note(format!("No option matches `{input}`."));
            };
            match services.progression_mut().submit_answer(&choice) {
                Some(_) => Reply::Render,
                None => note("Already answered. Type `next` to continue."),
            }
        }
    }
}

/// Map a 1-based index or an option label (plain or with ♯/♭) to its label.
pub fn resolve_choice(options: &[MarkedOption], input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(|option| option.label.clone());
    }
    options
        .iter()
        .find(|option| {
            option.label.eq_ignore_ascii_case(input) || format_note(&option.label) == input
        })
        .map(|option| option.label.clone())
}

// ─── RENDERING ─────────────────────────────────────────────────────────────

pub fn screen(services: &StudyServices) -> String {
    let active = services.active_view();
    let mut out = String::new();
    for view in View::ALL {
        if view == active {
            let _ = write!(out, "[{view}] ");
        } else {
            let _ = write!(out, " {view}  ");
        }
    }
    out.push('\n');

    let body = match active {
        View::Scales => render_flashcards(services.flashcards().view().as_ref()),
        View::Circle => render_circle(services.circle().view().as_ref()),
        View::Progression => render_progression(&services.progression().view()),
    };
    out.push_str(&body);
    out
}

pub fn render_flashcards(view: Option<&FlashcardView>) -> String {
    let Some(view) = view else {
        return "No scales loaded.\n".to_owned();
    };
    let mut out = String::new();
    let shuffle = if view.shuffle_mode { "  (shuffled)" } else { "" };
    let _ = writeln!(out, "{}{shuffle}", view.counter);
    let learned = if view.completed { "  ✓ learned" } else { "" };
    let _ = writeln!(out, "  {}{learned}", view.title);
    match view.face {
        CardFace::Front => out.push_str("  (flip to see the notes)\n"),
        CardFace::Back => {
            let _ = writeln!(out, "  {}", format_note(&view.notes));
        }
    }
    out
}

pub fn render_circle(view: Option<&CircleView>) -> String {
    let Some(view) = view else {
        return "No question yet. Type `next`.\n".to_owned();
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.prompt);
    render_options(&mut out, &view.options, true);
    if let Some(feedback) = &view.feedback {
        let _ = writeln!(out, "{feedback}");
    }
    let _ = writeln!(
        out,
        "Score: {}  ({} of {} correct)",
        view.score.score, view.score.correct_answers, view.score.total_attempts
    );
    out
}

pub fn render_progression(view: &ProgressionView) -> String {
    let mut out = String::new();
    match view {
        ProgressionView::Question {
            prompt,
            options,
            feedback,
            locked,
            score,
            total_questions,
        } => {
            let _ = writeln!(out, "{prompt}");
            render_options(&mut out, options, false);
            if let Some(feedback) = feedback {
                let _ = writeln!(out, "{feedback}");
            }
            if *locked {
                out.push_str("Type `next` for another question.\n");
            }
            let _ = writeln!(out, "Score: {score} / {total_questions}");
        }
        ProgressionView::Complete { message, .. } => {
            let _ = writeln!(out, "{message}");
            out.push_str("Type `reset` to start over.\n");
        }
        ProgressionView::Empty => out.push_str("No questions available.\n"),
    }
    out
}

fn render_options(out: &mut String, options: &[MarkedOption], notes: bool) {
    for (index, option) in options.iter().enumerate() {
        let label = if notes {
            format_note(&option.label)
        } else {
            option.label.clone()
        };
        let mark = match option.mark {
            OptionMark::Unmarked => "",
            OptionMark::Correct => "  ✓",
            OptionMark::Incorrect => "  ✗",
        };
        let _ = writeln!(out, "  {}) {label}{mark}", index + 1);
    }
}

// ─── LOOP ──────────────────────────────────────────────────────────────────

fn print_screen(services: &StudyServices) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\n{}", screen(services))?;
    write!(stdout, "> ")?;
    stdout.flush()
}

/// Time left before the circle trainer's pending advance, if one is scheduled.
fn advance_wait(services: &StudyServices) -> Option<Duration> {
    let circle = services.circle();
    let due = circle.advance_deadline()?;
    Some((due - circle.clock().now()).to_std().unwrap_or_default())
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending::<()>().await,
    }
}

/// Read commands until `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read or stdout cannot be written.
pub async fn run(services: &mut StudyServices) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_screen(services)?;

    loop {
        let wait = advance_wait(services);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let reply = match Command::parse(&line) {
                    Ok(command) => {
                        debug!(?command, "command received");
                        apply(services, command)
                    }
                    Err(err) => Reply::Note(format!("{err} (type `help` for commands)")),
                };
                match reply {
                    Reply::Quit => break,
                    Reply::Render => print_screen(services)?,
                    Reply::Help => {
                        println!("{HELP}");
                        print_screen(services)?;
                    }
                    Reply::Note(text) => {
                        println!("{text}");
                        print_screen(services)?;
                    }
                }
            }
            () = sleep_for(wait) => {
                if services.circle_mut().poll_advance() && services.active_view() == View::Circle {
                    print_screen(services)?;
                }
            }
        }
    }
    Ok(())
}
