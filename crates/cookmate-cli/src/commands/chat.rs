//! `cookmate chat`: free conversation with the assistant.

use crate::prompt;
use crate::render;
use anyhow::Result;
use colored::Colorize;
use cookmate_application::{
    AssistantBridge, AssistantSettings, ChatHistoryReconciler, ChatSurface, EventSink,
    SendOutcome, ViewScope,
};
use cookmate_core::api::ChatApi;
use cookmate_infrastructure::CookmateConfig;
use cookmate_interaction::HttpApiClient;
use rustyline::error::ReadlineError;
use std::sync::Arc;

const COMMANDS: &[&str] = &["/quick", "/exit"];

pub async fn run(config: &CookmateConfig, fresh: bool) -> Result<()> {
    let api: Arc<dyn ChatApi> = Arc::new(HttpApiClient::from_config(config)?);
    let scope = ViewScope::new();
    let (sink, mut events) = EventSink::channel();

    let settings = AssistantSettings {
        recommendation_delay: config.recommendation_delay(),
        quick_replies: config.assistant.quick_replies.clone(),
        greeting: config.assistant.greeting.clone(),
    };
    let reconciler = ChatHistoryReconciler::new(api.clone(), settings.greeting.clone());
    let bridge = AssistantBridge::new(api, settings, sink, scope.clone());

    let surface = if fresh {
        ChatSurface::Landing
    } else {
        ChatSurface::ChatPage
    };
    bridge.initialize(&reconciler, surface).await;

    println!("{}", "=== Cookmate assistant ===".bright_magenta().bold());
    for message in bridge.timeline().await {
        render::print_message(&message);
    }
    print_quick_replies(bridge.quick_replies());

    let mut editor = prompt::editor(COMMANDS)?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/exit' to leave.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(trimmed);

        let before = bridge.timeline().await.len();
        let outcome = match trimmed {
            "/exit" | "/quit" => break,
            "/quick" => {
                print_quick_replies(bridge.quick_replies());
                continue;
            }
            _ => match quick_reply(bridge.quick_replies(), trimmed) {
                Some(text) => {
                    println!("{}", format!("> {text}").green());
                    bridge.select_quick_reply(&text).await
                }
                None => bridge.send_message(trimmed).await,
            },
        };

        while let Ok(event) = events.try_recv() {
            render::print_event(&event);
        }
        if outcome != SendOutcome::Ignored {
            // the user's own line is already on screen
            for message in bridge.timeline().await.iter().skip(before + 1) {
                render::print_message(message);
            }
        }
    }

    scope.close();
    Ok(())
}

/// `:N` picks the N-th suggestion.
fn quick_reply(replies: &[String], input: &str) -> Option<String> {
    let index: usize = input.strip_prefix(':')?.parse().ok()?;
    replies.get(index.checked_sub(1)?).cloned()
}

fn print_quick_replies(replies: &[String]) {
    if replies.is_empty() {
        return;
    }
    println!("{}", "Suggestions (type :N to send):".bright_black());
    for (position, reply) in replies.iter().enumerate() {
        println!("  {} {}", format!(":{}", position + 1).bright_cyan(), reply);
    }
}
