//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the session
//! transcript and the advisor settings. Parsing is pure; applying a
//! setting change happens in the loop runner, which owns the settings.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Reset the conversation, keeping settings.
    New,
    /// Show the session transcript.
    History,
    /// Show the current advisor settings.
    Settings,
    /// Change the risk profile.
    Risk(String),
    /// Change the investment horizon.
    Horizon(String),
    /// Change the decode retry budget.
    Retries(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" | "/reset" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        "/settings" => Some(ChatCommand::Settings),
        "/risk" => Some(require_arg(
            arg,
            ChatCommand::Risk,
            "/risk requires a profile (conservative, moderate, aggressive)",
        )),
        "/horizon" => Some(require_arg(
            arg,
            ChatCommand::Horizon,
            "/horizon requires a horizon (short, medium, long)",
        )),
        "/retries" => Some(require_arg(
            arg,
            ChatCommand::Retries,
            "/retries requires a count (1-5)",
        )),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

fn require_arg(arg: Option<String>, make: fn(String) -> ChatCommand, missing: &str) -> ChatCommand {
    match arg {
        Some(value) if !value.is_empty() => make(value),
        _ => ChatCommand::Unknown(missing.to_string()),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "End the chat session");
    println!("  {}       {}", style("/new").cyan(), "Reset the conversation");
    println!("  {}   {}", style("/history").cyan(), "Show the session transcript");
    println!("  {}  {}", style("/settings").cyan(), "Show current advisor settings");
    println!("  {}      {}", style("/risk").cyan(), "Set risk profile (conservative, moderate, aggressive)");
    println!("  {}   {}", style("/horizon").cyan(), "Set investment horizon (short, medium, long)");
    println!("  {}   {}", style("/retries").cyan(), "Set decode retry budget (1-5)");
    println!();
    println!("  {}", style("Ctrl+D to exit, Ctrl+C is safe (no message loss)").dim());
    println!();
}
