//! `config` command group.

use std::path::Path;

use crate::cli::ConfigCommand;
use crate::config;

pub fn run(path_override: Option<&Path>, cmd: ConfigCommand, quiet: bool) -> anyhow::Result<()> {
    let path = config::config_path(path_override)?;
    match cmd {
        ConfigCommand::Init => {
            config::init(&path)?;
            if !quiet {
                println!("wrote {}", path.display());
                println!("fill in your credentials, or use the NAMECHEAP_* environment variables");
            }
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
