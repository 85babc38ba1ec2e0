use std::io::Write;

use anyhow::bail;
use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::io::Stdin;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatCommand;
use crate::domain::models::CredentialStore;
use crate::domain::models::CredentialValidator;
use crate::domain::models::ModelRegistry;
use crate::domain::services::ConversationSession;
use crate::domain::services::SelectOutcome;
use crate::domain::services::TurnOutcome;

const DIVIDER: &str = "==================================================";

pub fn render_menu(registry: &ModelRegistry, credentials: &CredentialStore) -> String {
    let mut lines = vec!["\n🤖 Select AI Model:".to_string(), DIVIDER.to_string()];

    for descriptor in registry.list() {
        let marker = if CredentialValidator::is_configured(credentials, descriptor) {
            "✅"
        } else {
            "❌"
        };
        lines.push(format!(
            "{}. {marker} {} ({})",
            descriptor.id, descriptor.display_name, descriptor.provider
        ));
    }

    lines.push("".to_string());
    lines.push("❌ = API key not configured".to_string());
    lines.push("✅ = Ready to use".to_string());
    lines.push(DIVIDER.to_string());

    return lines.join("\n");
}

fn print_banner(session: &ConversationSession) {
    println!("🤖 Multi-Model Chat with Memory");
    println!("{DIVIDER}");
    println!("Welcome! This client supports multiple AI models:");
    println!("• Google Gemini models");
    println!("• Groq models (Llama, Mixtral)");
    println!("• Conversation memory for context retention");
    println!("{DIVIDER}");

    let credentials = session.credentials();
    if !CredentialValidator::is_usable(credentials.get(ConfigKey::GoogleApiKey)) {
        println!(
            "{}",
            Paint::yellow("⚠️  Google API key not configured (Gemini models will be unavailable)")
        );
    }
    if !CredentialValidator::is_usable(credentials.get(ConfigKey::GroqApiKey)) {
        println!(
            "{}",
            Paint::yellow("⚠️  Groq API key not configured (Groq models will be unavailable)")
        );
    }
}

fn print_command_help() {
    println!("\n🚀 Starting chat session...");
    println!("Commands:");
    println!("• Type your message to chat");
    println!("• 'switch' - Change AI model");
    println!("• 'clear' - Clear conversation memory");
    println!("• 'models' - Show the model menu");
    println!("• 'quit', 'exit', or 'bye' - End conversation");
    println!("{DIVIDER}");
}

fn prompt(label: &str) -> Result<()> {
    print!("{label}");
    std::io::stdout().flush()?;
    return Ok(());
}

/// Runs the selection retry loop until a model is bound. Returns false on
/// end of input. Rejections keep any previously bound model intact, so a
/// failed switch falls back to the prior session.
async fn run_selection(
    session: &mut ConversationSession,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    loop {
        println!("{}", render_menu(session.registry(), session.credentials()));
        let count = session.registry().list().len();
        prompt(&format!("\nEnter model number (1-{count}): "))?;

        let input = match lines.next_line().await? {
            Some(input) => input,
            None => return Ok(false),
        };

        match session.select_model(&input) {
            SelectOutcome::Selected {
                display_name,
                provider,
            } => {
                println!(
                    "\n{}",
                    Paint::green(format!("✅ Selected: {display_name} ({provider})"))
                );
                return Ok(true);
            }
            SelectOutcome::Rejected { reason, guidance } => {
                println!("{}", Paint::red(format!("❌ {reason}")));
                if let Some(guidance) = guidance {
                    println!("{guidance}");
                }
            }
        }
    }
}

pub async fn start(session: &mut ConversationSession) -> Result<()> {
    print_banner(session);

    if session.configured_count() == 0 {
        println!("{}", Paint::red("⚠️  Warning: No API keys configured!"));
        println!("Please configure at least one API key:");
        println!("• Google Gemini: get one from https://aistudio.google.com/app/apikey");
        println!("• Groq: get one from https://console.groq.com/keys");
        println!("Set GOOGLE_API_KEY or GROQ_API_KEY in your environment and restart.");
        bail!("no provider credentials are configured");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // A preconfigured model number skips the menu; anything invalid falls
    // back to interactive selection.
    let mut selected = false;
    let initial = Config::get(ConfigKey::Model);
    if !initial.is_empty() {
        match session.select_model(&initial) {
            SelectOutcome::Selected {
                display_name,
                provider,
            } => {
                println!(
                    "\n{}",
                    Paint::green(format!("✅ Selected: {display_name} ({provider})"))
                );
                selected = true;
            }
            SelectOutcome::Rejected { reason, .. } => {
                println!("{}", Paint::red(format!("❌ {reason}")));
            }
        }
    }
    if !selected && !run_selection(session, &mut lines).await? {
        return Ok(());
    }

    print_command_help();

    loop {
        let label = session.await_input();
        prompt(&format!("\n{label}"))?;

        let input = match lines.next_line().await? {
            Some(input) => input,
            None => {
                println!("\n🤖 Goodbye! Thanks for chatting with me!");
                return Ok(());
            }
        };

        let is_chat_message = !input.trim().is_empty() && ChatCommand::parse(&input).is_none();
        if is_chat_message {
            if let Some(name) = session.active_model_name() {
                println!("\n🤔 {name} is thinking...");
            }
        }

        match session.handle_turn(&input).await {
            TurnOutcome::Terminated => {
                println!("\n🤖 Goodbye! Thanks for chatting with me!");
                return Ok(());
            }
            TurnOutcome::SwitchRequested => {
                if !run_selection(session, &mut lines).await? {
                    return Ok(());
                }
            }
            TurnOutcome::Cleared => {
                println!("\n🧹 Memory cleared! Starting fresh conversation.");
            }
            TurnOutcome::ModelMenuRequested => {
                println!("{}", render_menu(session.registry(), session.credentials()));
            }
            TurnOutcome::EmptyInput => {
                println!("Please enter a message or use commands: 'switch', 'clear', 'quit'");
            }
            TurnOutcome::Reply { text, turn_count } => {
                let name = session.active_model_name().unwrap_or_default();
                println!("\n🤖 {name}: {text}");
                println!("📊 Memory: {turn_count} turns stored | Model: {name}");
            }
            TurnOutcome::Failed { error, guidance } => {
                println!("{}", Paint::red(format!("\n❌ Error: {error}")));
                if let Some(guidance) = guidance {
                    println!("{guidance}");
                }
            }
        }
    }
}
