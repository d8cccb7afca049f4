#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::Navigation;
use infrastructure::api::GatewayManager;
use infrastructure::storage::file::FileSessionStore;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! Logicalc has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// One pass of the formula composer with its own background worker.
async fn run_interface() -> Result<Navigation> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(GatewayManager::get(), event_tx, &mut action_rx).await;
    });

    let ui_future = ui::start(Box::new(FileSessionStore::default()), action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(Err(err))) => Err(err),
            Some(Err(err)) => Err(err.into()),
            _ => Ok(Navigation::Quit),
        },
        res = ui_future => res,
    );

    background_futures.abort_all();
    return res;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("LOGICALC_LOG_DIR").unwrap_or_else(|_| {
        return Config::cache_dir().to_string_lossy().to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("logicalc")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => handle_error(err),
    }

    loop {
        match run_interface().await {
            Ok(Navigation::Quit) => break,
            Ok(Navigation::Login(message)) => {
                tracing::info!(message = ?message, "Leaving the composer to log in");
                if let Err(err) = cli::authenticate_interactive(message).await {
                    handle_error(err);
                }
            }
            Err(err) => {
                ui::destruct_terminal_for_panic();
                handle_error(err);
            }
        }
    }

    process::exit(0);
}
