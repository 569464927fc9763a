//! `cookmate cook <recipe-id>`: the interactive cooking loop.

use crate::prompt;
use crate::render;
use anyhow::Result;
use colored::Colorize;
use cookmate_application::{
    AssistantSettings, CookingView, EventSink, ExitDecision, KeyboardHub, SendOutcome, UiEvent,
    ViewSettings,
};
use cookmate_core::api::{ChatApi, CookingSessionApi, RecipeApi};
use cookmate_core::cooking::{Key, StartState, TimerId};
use cookmate_infrastructure::CookmateConfig;
use cookmate_interaction::HttpApiClient;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

const COMMANDS: &[&str] = &[
    "next", "prev", "run", "mark", "goto", "done", "timer", "pause", "rm", "note", "ask",
    "start", "finish", "exit", "help",
];

/// One line of input in the cooking loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CookCommand {
    Key(Key),
    GoTo(i64),
    ToggleDone(usize),
    StepTimer,
    Timer { minutes: u32, label: String },
    ToggleTimer(usize),
    RemoveTimer(usize),
    Note(String),
    Ask(String),
    Start,
    Finish,
    Exit,
    Help,
    Refresh,
}

impl CookCommand {
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => Self::Refresh,
            "n" | "next" => Self::Key(Key::ArrowRight),
            "p" | "prev" => Self::Key(Key::ArrowLeft),
            "r" | "run" => Self::Key(Key::Space),
            "m" | "mark" => Self::Key(Key::Char('m')),
            "goto" => Self::GoTo(parse_number(rest)?.saturating_sub(1)),
            "done" => Self::ToggleDone(parse_position(rest)?),
            "timer" if rest.is_empty() => Self::StepTimer,
            "timer" => {
                let (minutes, label) = match rest.split_once(char::is_whitespace) {
                    Some((minutes, label)) => (minutes, label.trim().to_string()),
                    None => (rest, "Timer".to_string()),
                };
                let minutes = minutes
                    .parse::<u32>()
                    .ok()
                    .filter(|m| *m > 0)
                    .ok_or_else(|| format!("'{minutes}' is not a number of minutes"))?;
                Self::Timer { minutes, label }
            }
            "pause" => Self::ToggleTimer(parse_position(rest)?),
            "rm" => Self::RemoveTimer(parse_position(rest)?),
            "note" if !rest.is_empty() => Self::Note(rest.to_string()),
            "ask" if !rest.is_empty() => Self::Ask(rest.to_string()),
            "start" => Self::Start,
            "finish" => Self::Finish,
            "exit" | "quit" => Self::Exit,
            "help" | "?" => Self::Help,
            _ if line.len() > 1 && line.starts_with('/') => {
                Self::Ask(line[1..].trim().to_string())
            }
            _ => return Err(format!("Unknown command '{word}'. Type 'help'.")),
        };
        Ok(command)
    }
}

fn parse_number(text: &str) -> std::result::Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("'{text}' is not a number"))
}

/// 1-based position typed by the user to 0-based index.
fn parse_position(text: &str) -> std::result::Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{text}' is not a valid position")),
    }
}

fn print_help() {
    let lines = [
        ("n / next, p / prev", "move between steps"),
        ("r / run", "pause or resume the clock"),
        ("m / mark", "mark the current step done"),
        ("goto <step>, done <step>", "jump to a step, toggle a step"),
        ("timer [<min> [label]]", "start a timer (no args: from the step)"),
        ("pause <n>, rm <n>", "pause/resume or remove timer #n"),
        ("note <text>", "add a line to the session notes"),
        ("ask <question>, /<question>", "ask the assistant about this step"),
        ("start", "retry creating the session"),
        ("finish", "save the session and leave"),
        ("exit", "leave without saving"),
    ];
    for (keys, what) in lines {
        println!("  {:<30} {}", keys.bright_cyan(), what.bright_black());
    }
}

/// Prints pending events. Returns true once navigation away was requested.
fn drain_events(events: &mut UnboundedReceiver<UiEvent>) -> bool {
    let mut leave = false;
    while let Ok(event) = events.try_recv() {
        render::print_event(&event);
        leave |= matches!(event, UiEvent::Navigate { .. });
    }
    leave
}

/// Id of the timer shown at `position`, as listed in the last snapshot order.
async fn timer_at(view: &CookingView, position: usize) -> Option<TimerId> {
    let snapshot = view.snapshot().await;
    let id = snapshot.timers.get(position).map(|timer| timer.id.clone());
    if id.is_none() {
        println!("{}", format!("No timer #{}", position + 1).red());
    }
    id
}

pub async fn run(config: &CookmateConfig, recipe_id: i64) -> Result<()> {
    let client = Arc::new(HttpApiClient::from_config(config)?);

    let recipe = match client.get_recipe(recipe_id).await {
        Ok(recipe) => recipe,
        Err(err) if err.is_not_found() => {
            println!("{}", format!("Recipe #{recipe_id} does not exist.").red());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(recipe_id, steps = recipe.steps.len(), "Recipe loaded");

    let session_api: Arc<dyn CookingSessionApi> = client.clone();
    let chat_api: Arc<dyn ChatApi> = client;
    let settings = ViewSettings {
        assistant: AssistantSettings {
            recommendation_delay: config.recommendation_delay(),
            quick_replies: config.assistant.quick_replies.clone(),
            greeting: config.assistant.greeting.clone(),
        },
        ..ViewSettings::default()
    };

    let keyboard = KeyboardHub::new();
    let (sink, mut events) = EventSink::channel();
    let view = CookingView::mount(recipe, session_api, chat_api, &keyboard, settings, sink);

    let mut editor = prompt::editor(COMMANDS)?;
    println!("{}", "=== Cookmate ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands.".bright_black());

    loop {
        if drain_events(&mut events) {
            break;
        }
        render::print_snapshot(&view.snapshot().await);

        let line = match editor.readline("cook> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'exit' to leave.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let command = match CookCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        let controller = view.controller();
        match command {
            CookCommand::Refresh => {}
            CookCommand::Help => print_help(),
            CookCommand::Key(key) => {
                keyboard.dispatch(key).await;
            }
            CookCommand::GoTo(index) => {
                controller.go_to(index).await;
            }
            CookCommand::ToggleDone(index) => {
                controller.toggle_complete(index).await;
            }
            CookCommand::StepTimer => {
                if controller.start_step_timer().await.is_none() {
                    println!("{}", "This step has no duration to time.".yellow());
                }
            }
            CookCommand::Timer { minutes, label } => {
                controller.start_timer(label, minutes).await;
            }
            CookCommand::ToggleTimer(position) => {
                if let Some(id) = timer_at(&view, position).await {
                    controller.toggle_timer(&id).await;
                }
            }
            CookCommand::RemoveTimer(position) => {
                if let Some(id) = timer_at(&view, position).await {
                    controller.remove_timer(&id).await;
                }
            }
            CookCommand::Note(text) => controller.append_note(&text).await,
            CookCommand::Ask(text) => {
                let before = view.assistant().timeline().await.len();
                println!("{}", "Thinking...".bright_black());
                match view.ask(&text).await {
                    SendOutcome::Ignored => {
                        println!("{}", "Still waiting for the last answer.".yellow());
                    }
                    _ => {
                        let timeline = view.assistant().timeline().await;
                        // skip the echoed question
                        for message in timeline.iter().skip(before + 1) {
                            render::print_message(message);
                        }
                    }
                }
            }
            CookCommand::Start => {
                if let StartState::Started(session) = controller.start().await {
                    println!(
                        "{}",
                        format!("Session #{} started.", session.id).bright_green()
                    );
                }
            }
            CookCommand::Finish => {
                // failures are reported through the event channel
                let _ = controller.finish().await;
            }
            CookCommand::Exit => match controller.request_exit().await {
                ExitDecision::Exited => {}
                ExitDecision::ConfirmationRequired => {
                    let answer = editor.readline("The clock is running. Leave anyway? (y/N) ")?;
                    if answer.trim().eq_ignore_ascii_case("y") {
                        controller.confirm_exit().await;
                    }
                }
            },
        }
    }

    view.unmount();
    Ok(())
}
