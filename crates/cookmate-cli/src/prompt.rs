//! rustyline helper with command completion and hints.

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

/// Completes the first word of a line against a fixed command list.
#[derive(Clone)]
pub struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    pub fn new(commands: &[&'static str]) -> Self {
        Self {
            commands: commands.to_vec(),
        }
    }

    fn matches<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.commands
            .iter()
            .copied()
            .filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .matches(line)
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let first = line.split_whitespace().next().unwrap_or_default();
        if !first.is_empty() && self.commands.contains(&first) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.matches(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CommandHelper {}

pub type CommandEditor = Editor<CommandHelper, DefaultHistory>;

pub fn editor(commands: &[&'static str]) -> rustyline::Result<CommandEditor> {
    let mut editor = Editor::new()?;
    editor.set_helper(Some(CommandHelper::new(commands)));
    Ok(editor)
}
