//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when the shell starts, showing the advisor
//! settings in effect and a hint about slash commands.

use console::style;

use marketeer_types::advisor::AdvisorSettings;

/// Print the welcome banner at the start of a session.
///
/// When no credential was configured a warning line is included so the
/// user knows why questions will not reach the model.
pub fn print_welcome_banner(settings: &AdvisorSettings, has_credential: bool) {
    println!();
    println!("  💼 {}", style("Marketeer").cyan().bold());
    println!("  {}", style("AI investment advisor in your terminal").dim());
    println!();
    println!("  {}    {}", style("Model:").bold(), style(&settings.model).dim());
    println!(
        "  {}     {}",
        style("Risk:").bold(),
        style(settings.risk_profile.label()).dim()
    );
    println!(
        "  {}  {}",
        style("Horizon:").bold(),
        style(settings.time_horizon.label()).dim()
    );
    println!(
        "  {}  {}",
        style("Retries:").bold(),
        style(settings.max_retries).dim()
    );
    if !has_credential {
        println!();
        println!(
            "  {}",
            style("! No OPENROUTER_API_KEY detected").yellow().bold()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
