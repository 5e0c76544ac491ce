//! authflow - sign in to the task tracker from the terminal.
//!
//! Runs the same login flow the web client uses: the token lands in the
//! durable storage file, and the post-login destination is printed instead
//! of navigated to.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use authflow_core::{
    AccessGuard, Config, Credentials, FileStore, HintStore, HttpAuthClient, LoginController,
    MemoryStore, Navigator, Notifier, RedirectResolver, SessionContext, SessionStore,
    SubmitOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "Usage: authflow [login] [--redirect PATH] | status | logout";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[derive(Debug, PartialEq)]
enum Command {
    Login { redirect: Option<String> },
    Status,
    Logout,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut args = args.iter().map(String::as_str);
    let mut command = Command::Login { redirect: None };

    while let Some(arg) = args.next() {
        match arg {
            "login" => {}
            "status" => command = Command::Status,
            "logout" => command = Command::Logout,
            "--redirect" => {
                let Command::Login { redirect } = &mut command else {
                    anyhow::bail!("--redirect only applies to login\n{}", USAGE);
                };
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--redirect needs a path\n{}", USAGE))?;
                *redirect = Some(path.to_string());
            }
            _ => anyhow::bail!("Unexpected argument: {}\n{}", arg, USAGE),
        }
    }
    Ok(command)
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        println!("Continue at: {}", path);
    }
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("{}", message);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let storage_path = config.storage_path()?;
    let storage = FileStore::open(&storage_path)
        .with_context(|| format!("Failed to open session storage {}", storage_path.display()))?;
    let session = SessionStore::new(Arc::new(storage));

    match command {
        Command::Status => print_status(&session),
        Command::Logout => {
            session.clear()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Login { redirect } => login(&mut config, session, redirect).await,
    }
}

fn print_status(session: &SessionStore) -> Result<()> {
    match session.token_entry()? {
        Some(entry) => println!("Signed in ({}).", entry.age_display()),
        None if session.is_expired()? => {
            println!("Session expired. Run `authflow login` to sign in again.")
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Interactive login, retried until it succeeds or the user gives up
async fn login(config: &mut Config, session: SessionStore, redirect: Option<String>) -> Result<()> {
    if session.is_authenticated()? {
        println!("Already signed in. Run `authflow logout` first.");
        return Ok(());
    }
    if session.is_expired()? {
        println!("Your session has expired. Please sign in again.");
    }

    let hints = HintStore::new(Arc::new(MemoryStore::new()));
    if let Some(path) = redirect {
        AccessGuard::new(session.clone(), hints.clone()).check(&path)?;
    }

    let base_url = config.api_base_url();
    let client = HttpAuthClient::new(base_url.clone())?;
    let context = Arc::new(SessionContext::new());
    let controller = LoginController::new(
        Arc::new(client),
        session,
        context.clone(),
        RedirectResolver::new(hints),
        Arc::new(TerminalNavigator),
        Arc::new(TerminalNotifier),
    );

    println!("\n=== Sign in to {} ===\n", base_url);

    loop {
        let email = prompt_email(config.last_email.as_deref())?;
        let password = rpassword::prompt_password("Password: ")?;

        println!("\nLogging in...");
        match controller.submit(Credentials::new(email.clone(), password)).await {
            SubmitOutcome::Authenticated { role, .. } => {
                let name = context
                    .current()
                    .and_then(|user| user.profile_str("name").map(str::to_string))
                    .unwrap_or_else(|| email.clone());
                println!("Welcome, {} ({}).", name, role);

                config.last_email = Some(email);
                if let Err(e) = config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                info!("Login complete");
                return Ok(());
            }
            SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => {
                if let Some(message) = controller.error() {
                    eprintln!("Error: {}", message);
                }
                if !confirm("Try again? [Y/n]: ")? {
                    anyhow::bail!("Login cancelled");
                }
            }
        }
    }
}

fn prompt_email(last_email: Option<&str>) -> Result<String> {
    match last_email {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match last_email {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    })
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase() != "n")
}
