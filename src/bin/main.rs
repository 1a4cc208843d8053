use tracing_subscriber::EnvFilter;

mod command;
mod error;

use self::command::Command;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let command = Command::new();
    if let Err(err) = command.run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
