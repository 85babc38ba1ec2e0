#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use yansi::Paint;

use crate::application::cli;
use crate::application::repl;
use crate::domain::models::CredentialStore;
use crate::domain::models::ModelRegistry;
use crate::domain::services::ConversationSession;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Muesli has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("MUESLI_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("muesli")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("muesli")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse();
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    let registry = ModelRegistry::builtin();
    let credentials = CredentialStore::from_config(&registry);
    let mut session = ConversationSession::new(registry, credentials);

    let res = tokio::select!(
        res = repl::start(&mut session) => res,
        res = tokio::signal::ctrl_c() => {
            // History is ephemeral; exit without flushing anything.
            println!("\n\n👋 Shutting down gracefully...");
            res.map_err(Error::from)
        },
    );

    if res.is_err() {
        handle_error(res.unwrap_err());
    }

    process::exit(0);
}
