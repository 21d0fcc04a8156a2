//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: welcome banner, seeded greeting,
//! input loop with slash commands, and turn dispatch through the engine
//! with the terminal renderer as the sink.

use std::time::Instant;

use console::style;
use tracing::debug;

use marketeer_core::advisor::turn::TurnEngine;
use marketeer_core::chat::conversation::{Conversation, RESET_MESSAGE, WELCOME_MESSAGE};
use marketeer_infra::llm::OpenRouterProvider;
use marketeer_types::advisor::{AdvisorSettings, RiskProfile, TimeHorizon};
use marketeer_types::llm::MessageRole;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::TerminalRenderer;

/// Run the interactive advisor session.
///
/// `provider` is `None` when no API key was configured; the loop still
/// runs, and every question is answered with setup instructions.
pub async fn run_chat_loop(
    mut settings: AdvisorSettings,
    provider: Option<OpenRouterProvider>,
) -> anyhow::Result<()> {
    let engine = TurnEngine::new(provider);
    let mut conversation = Conversation::new();
    let mut renderer = TerminalRenderer::new();

    print_welcome_banner(&settings, engine.has_provider());
    print_advisor_line(WELCOME_MESSAGE);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                // Slash commands
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::New => {
                            conversation.reset();
                            println!();
                            print_advisor_line(RESET_MESSAGE);
                        }
                        ChatCommand::History => print_history(&conversation),
                        ChatCommand::Settings => print_settings(&settings),
                        ChatCommand::Risk(value) => match value.parse::<RiskProfile>() {
                            Ok(profile) => {
                                settings.risk_profile = profile;
                                println!(
                                    "\n  {} Risk profile set to {}\n",
                                    style("*").cyan().bold(),
                                    style(profile.label()).bold()
                                );
                            }
                            Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
                        },
                        ChatCommand::Horizon(value) => match value.parse::<TimeHorizon>() {
                            Ok(horizon) => {
                                settings.time_horizon = horizon;
                                println!(
                                    "\n  {} Investment horizon set to {}\n",
                                    style("*").cyan().bold(),
                                    style(horizon.label()).bold()
                                );
                            }
                            Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
                        },
                        ChatCommand::Retries(value) => match value.parse::<u32>() {
                            Ok(n) if AdvisorSettings::RETRY_RANGE.contains(&n) => {
                                settings.max_retries = n;
                                println!(
                                    "\n  {} Retry budget set to {n}\n",
                                    style("*").cyan().bold()
                                );
                            }
                            _ => println!(
                                "\n  {} Retry budget must be between 1 and 5.\n",
                                style("!").red().bold()
                            ),
                        },
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                // A question for the advisor
                conversation.push_user(text);
                renderer.begin_turn();
                let start = Instant::now();
                let report = engine
                    .run_turn(&mut conversation, &settings, &mut renderer)
                    .await;
                if report.succeeded() {
                    renderer.print_turn_footer(start.elapsed(), &settings.model, report.attempts);
                } else if let Some(error) = &report.error {
                    debug!(attempts = report.attempts, error = %error, "turn ended in failure");
                }
            }
        }
    }

    Ok(())
}

/// Print a transcript seed the way completed turns are shown.
fn print_advisor_line(content: &str) {
    println!("  {} {content}", style("Advisor >").cyan().bold());
    println!();
}

/// Print the full transcript, one preview line per message.
fn print_history(conversation: &Conversation) {
    println!();
    for message in conversation.messages() {
        let label = match message.role {
            MessageRole::User => style("You").green().bold(),
            _ => style("Advisor").cyan().bold(),
        };
        println!("  {} {}", label, preview(&message.content));
    }
    println!();
}

fn print_settings(settings: &AdvisorSettings) {
    println!();
    println!("  {}", style("Advisor settings:").bold());
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
    println!();
}

/// First line of a message, truncated for the transcript listing. Styling
/// escapes are stripped first so truncation cannot split a sequence.
fn preview(content: &str) -> String {
    let plain = console::strip_ansi_codes(content);
    let first_line = plain.lines().next().unwrap_or_default();
    if first_line.chars().count() > 100 {
        let head: String = first_line.chars().take(97).collect();
        format!("{head}...")
    } else {
        first_line.to_string()
    }
}
