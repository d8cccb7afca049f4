use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Credentials;
use crate::domain::models::SessionStore;
use crate::domain::models::NOT_LOGGED_IN_MESSAGE;
use crate::domain::services::actions::help_text;
use crate::domain::services::AuthService;
use crate::infrastructure::api::GatewayManager;
use crate::infrastructure::storage::file::FileSessionStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn prompt_credentials(confirm_password: bool) -> Result<Credentials> {
    let theme = ColorfulTheme::default();
    let username: String = Input::with_theme(&theme)
        .with_prompt("Username")
        .interact_text()?;

    let mut password = Password::with_theme(&theme).with_prompt("Password");
    if confirm_password {
        password = password.with_confirmation("Repeat password", "Passwords do not match.");
    }

    return Ok(Credentials::new(username.trim(), &password.interact()?));
}

/// Prompts for credentials until a login succeeds.
pub async fn login_interactive() -> Result<()> {
    let gateway = GatewayManager::get();
    let store = FileSessionStore::default();

    loop {
        let credentials = prompt_credentials(false)?;
        match AuthService::login(gateway.as_ref(), &store, &credentials).await {
            Ok(()) => {
                println!("{}", Paint::green("Logged in."));
                return Ok(());
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Login failed");
                eprintln!("{}", Paint::red(err));
            }
        }
    }
}

/// Prompts for a new account until registration succeeds, then moves on to
/// logging in. A created account is never registered a second time.
pub async fn register_interactive() -> Result<()> {
    let gateway = GatewayManager::get();

    loop {
        let credentials = prompt_credentials(true)?;
        match AuthService::register(gateway.as_ref(), &credentials).await {
            Ok(()) => {
                println!(
                    "{}",
                    Paint::green("Registration successful! You can now log in.")
                );
                break;
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Registration failed");
                eprintln!("{}", Paint::red(err));
            }
        }
    }

    return login_interactive().await;
}

/// Shown whenever the interface sends the user to log in. Offers registering
/// for users without an account.
pub async fn authenticate_interactive(message: Option<String>) -> Result<()> {
    if let Some(message) = message {
        println!("{}", Paint::yellow(message));
    }

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("How would you like to continue?")
        .default(0)
        .items(&["Log in", "Register a new account"])
        .interact()?;

    if idx == 1 {
        return register_interactive().await;
    }

    return login_interactive().await;
}

async fn print_history() -> Result<()> {
    let store = FileSessionStore::default();
    let token = match store.get()? {
        Some(token) => token,
        None => bail!(NOT_LOGGED_IN_MESSAGE),
    };

    let entries = GatewayManager::get().fetch_history(&token).await?;
    if entries.is_empty() {
        println!("There is no history yet. Solve your first formula!");
        return Ok(());
    }

    let lines = entries
        .iter()
        .map(|entry| return format!("- {}", entry.label()))
        .collect::<Vec<String>>();

    println!("{}", lines.join("\n"));
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Logicalc")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Logicalc with environment variable RUST_LOG=logicalc")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("token-path").about("Output path to the file the session token is persisted in.")
        );
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") || line.starts_with("PALETTE:") {
                return Paint::new(format!("SOLVE {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("logicalc")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("solve").about("Open the formula composer. This is the default when no command is given."))
        .subcommand(Command::new("login").about("Log in with a username and password. The session token is stored for later runs."))
        .subcommand(Command::new("register").about("Create a new account, then log in with it."))
        .subcommand(Command::new("logout").about("Forget the stored session token."))
        .subcommand(Command::new("history").about("Print previously solved formulas."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LOGICALC_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("LOGICALC_API_URL")
                .num_args(1)
                .help(format!("Base URL of the solving service API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("LOGICALC_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before giving up on a request to the solving service. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TokenFile.to_string())
                .long(ConfigKey::TokenFile.to_string())
                .env("LOGICALC_TOKEN_FILE")
                .num_args(1)
                .help(format!("Path of the file the session token is persisted in. [default: {}]", Config::default(ConfigKey::TokenFile)))
                .global(true),
        );
}

/// Returns true when the formula composer should be opened.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = Config::cache_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                Some(("token-path", token_matches)) => {
                    Config::load(vec![&matches, debug_matches, token_matches]).await?;
                    println!("{}", Config::get(ConfigKey::TokenFile));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("solve", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("login", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            if AuthService::is_logged_in(&FileSessionStore::default()) {
                println!("Already logged in. Logging in again replaces the stored session.");
            }
            login_interactive().await?;
            return Ok(false);
        }
        Some(("register", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            register_interactive().await?;
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            AuthService::logout(&FileSessionStore::default())?;
            println!("Logged out.");
            return Ok(false);
        }
        Some(("history", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            print_history().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
