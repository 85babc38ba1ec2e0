use std::io;

use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;

use crate::application::repl;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CredentialStore;
use crate::domain::models::ModelRegistry;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn arg_google_api_key() -> Arg {
    return Arg::new(ConfigKey::GoogleApiKey.to_string())
        .long(ConfigKey::GoogleApiKey.to_string())
        .env("GOOGLE_API_KEY")
        .num_args(1)
        .help("Google AI Studio API key used by the Gemini models.")
        .global(true);
}

fn arg_google_url() -> Arg {
    return Arg::new(ConfigKey::GoogleUrl.to_string())
        .long(ConfigKey::GoogleUrl.to_string())
        .env("MUESLI_GOOGLE_URL")
        .num_args(1)
        .help(format!(
            "Google API URL for the Gemini models. [default: {}]",
            Config::default(ConfigKey::GoogleUrl)
        ))
        .global(true);
}

fn arg_groq_api_key() -> Arg {
    return Arg::new(ConfigKey::GroqApiKey.to_string())
        .long(ConfigKey::GroqApiKey.to_string())
        .env("GROQ_API_KEY")
        .num_args(1)
        .help("Groq API key used by the Llama and Mixtral models.")
        .global(true);
}

fn arg_groq_url() -> Arg {
    return Arg::new(ConfigKey::GroqUrl.to_string())
        .long(ConfigKey::GroqUrl.to_string())
        .env("MUESLI_GROQ_URL")
        .num_args(1)
        .help(format!(
            "Groq API URL. Can be swapped to a compatible proxy. [default: {}]",
            Config::default(ConfigKey::GroqUrl)
        ))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("MUESLI_MODEL")
        .num_args(1)
        .help("Menu number of the model to select at startup, skipping the interactive menu.");
}

fn subcommand_completions() -> Command {
    return Command::new("completions").about("Generates shell completions.").arg(
        Arg::new("shell")
            .short('s')
            .long("shell")
            .help("Which shell to generate completions for.")
            .action(ArgAction::Set)
            .value_parser(value_parser!(Shell))
            .required(true),
    );
}

fn subcommand_models() -> Command {
    return Command::new("models")
        .about("List the available models and whether their provider credential is configured.");
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION")
    );

    return Command::new("muesli")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_models())
        .arg(arg_google_api_key())
        .arg(arg_google_url())
        .arg(arg_groq_api_key())
        .arg(arg_groq_url())
        .arg(arg_model());
}

/// Returns true when the chat session should start, false when a
/// subcommand already handled the run.
pub fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("models", _)) => {
            Config::load(vec![&matches])?;
            let registry = ModelRegistry::builtin();
            let credentials = CredentialStore::from_config(&registry);
            println!("{}", repl::render_menu(&registry, &credentials));
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches])?;
        }
    }

    return Ok(true);
}
