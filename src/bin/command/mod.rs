use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::error::Error;

mod generate;

#[derive(Debug, Parser)]
#[command(
    name = "clash-compose",
    version,
    about = "Merges SOCKS5 port mappings and upstream proxy credentials into a Clash configuration"
)]
pub enum Command {
    #[command(about = "Shows current version")]
    Version,

    #[command(about = "Shows shell completions")]
    Completions { shell: Shell },

    #[command(about = "Generates a merged Clash configuration")]
    Generate(generate::Options),
}

impl Command {
    #[inline]
    pub fn new() -> Command { Command::parse() }

    pub fn run(self) -> Result<(), Error> {
        match self {
            Command::Version => {
                print!("{}", Command::command().render_version());
                Ok(())
            }
            Command::Completions { shell } => {
                let mut app = Command::command();
                let app_name = app.get_name().to_owned();
                clap_complete::generate(shell, &mut app, app_name, &mut io::stdout());
                Ok(())
            }
            Command::Generate(options) => generate::run(options),
        }
    }
}
