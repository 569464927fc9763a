//! Terminal rendering of session snapshots, chat entries and UI events.

use colored::Colorize;
use cookmate_application::{Navigation, NotificationLevel, SessionSnapshot, UiEvent};
use cookmate_core::chat::{ChatMessage, MessageContent, MessageRole};
use cookmate_core::cooking::format_seconds;
use cookmate_core::recipe::highlight_keywords;

/// Step text with cooking keywords emphasized.
pub fn highlighted(text: &str) -> String {
    highlight_keywords(text)
        .into_iter()
        .map(|segment| {
            if segment.emphasized {
                segment.text.bright_yellow().bold().to_string()
            } else {
                segment.text
            }
        })
        .collect()
}

pub fn print_snapshot(snapshot: &SessionSnapshot) {
    let status = if snapshot.is_running {
        "running".green()
    } else {
        "paused".yellow()
    };
    let mode = if snapshot.local_only {
        " (not saved)".red().to_string()
    } else {
        String::new()
    };

    println!();
    println!(
        "{}  {}  {}{}",
        snapshot.recipe_title.bright_magenta().bold(),
        format_seconds(snapshot.elapsed_seconds).bright_white(),
        status,
        mode
    );

    if snapshot.step_count == 0 {
        println!("{}", "This recipe has no steps.".bright_black());
    } else {
        let done = if snapshot.completed.contains(&snapshot.current_index) {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!(
            "{} Step {}/{}  {:.0}% done, about {} min left",
            done,
            snapshot.current_index + 1,
            snapshot.step_count,
            snapshot.progress * 100.0,
            snapshot.estimated_minutes_remaining
        );
        if let Some(step) = &snapshot.current_step {
            println!("  {}", highlighted(&step.instruction_text));
            if let Some(minutes) = step.timer_minutes {
                println!("  {}", format!("timer hint: {minutes} min").bright_black());
            }
        }
        if snapshot.is_last_step {
            println!("{}", "  Last step. Type 'finish' when you are done.".bright_black());
        } else if snapshot.is_first_step && snapshot.completed.is_empty() {
            println!("{}", "  Type 'n' for the next step, 'help' for more.".bright_black());
        }
    }

    for (position, timer) in snapshot.timers.iter().enumerate() {
        let state = if timer.is_finished() {
            "done".green()
        } else if timer.is_active {
            "on".cyan()
        } else {
            "paused".yellow()
        };
        println!(
            "  {} {} {} {}",
            format!("#{}", position + 1).bright_black(),
            timer.label,
            timer.remaining_display().bright_white(),
            state
        );
    }
}

pub fn print_message(message: &ChatMessage) {
    match (&message.role, &message.content) {
        (MessageRole::User, MessageContent::Text { text }) => {
            println!("{}", format!("> {text}").green());
        }
        (MessageRole::Assistant, MessageContent::Text { text }) => {
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        (_, MessageContent::RecipeRecommendation { recipe }) => {
            let minutes = recipe.preparation_time.unwrap_or(0) + recipe.cooking_time.unwrap_or(0);
            println!(
                "{} {} {}",
                "Recipe:".bright_magenta(),
                recipe.title.bold(),
                format!("(#{}, {minutes} min)", recipe.id).bright_black()
            );
            if let Some(description) = &recipe.description {
                println!("  {}", description.bright_black());
            }
        }
    }
}

pub fn print_event(event: &UiEvent) {
    match event {
        UiEvent::Notification { level, message } => match level {
            NotificationLevel::Error => eprintln!("{}", message.red()),
            NotificationLevel::Success => println!("{}", message.bright_green()),
            NotificationLevel::Info => println!("{}", message.bright_black()),
        },
        UiEvent::TimerFinished { label, .. } => {
            println!("{}", format!("Timer finished: {label}").bright_green().bold());
        }
        UiEvent::Navigate {
            to: Navigation::RecipeDetail { recipe_id },
        } => {
            println!("{}", format!("Back to recipe #{recipe_id}.").bright_black());
        }
        UiEvent::FocusChatInput => {}
    }
}
