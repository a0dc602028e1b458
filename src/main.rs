// keyshell - application entry point
//
// Parses CLI arguments, initializes logging on stderr (quiet unless RUST_LOG
// asks for more) and runs the interactive shell until the user quits.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keyshell::cli::Cli;
use keyshell::process::SystemRunner;
use keyshell::terminal::ReadlineTerminal;
use keyshell::{Console, Keystore, PasswordHolder, Shell};

fn main() {
    // RUST_LOG=keyshell=debug shows every keytool/openssl call. Passwords are never logged.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keyshell=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> keyshell::Result<()> {
    let config = cli.config.load()?;
    let store = Keystore::new(cli.store, PasswordHolder::new(cli.password), &config);
    let console = Console::new(Box::new(ReadlineTerminal::new()?), Box::new(SystemRunner));
    Shell::new(store, console, config).run()
}
