// file: src/utils/prompt.rs
// version: 1.1.0
// guid: 92c5e7a0-6f18-4d3b-85c9-4e07b2d1a6f8

//! Interactive terminal prompts

use crate::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, IsTerminal, Write};

/// Prompt for a line of input, returning it trimmed
pub fn prompt_line(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a secret without echoing it. Falls back to a plain read
/// when stdin is not a terminal (pipes, tests).
pub fn prompt_hidden(message: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return prompt_line(message);
    }

    print!("{}", message);
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden();
    terminal::disable_raw_mode()?;
    println!();

    result
}

fn read_hidden() -> Result<String> {
    let mut buffer = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(crate::GcliError::cancelled("input cancelled"));
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
        }
    }
    Ok(buffer.trim().to_string())
}
