//! Command dispatch.

mod account;
mod config_cmd;
mod dns;
mod domain;
mod privacy;

use std::path::Path;

use clap::CommandFactory;
use namecheap_api::NamecheapClient;

use crate::cli::{Cli, Command};
use crate::config;
use crate::output::OutputFormat;

/// Everything a command handler needs.
pub struct Ctx {
    pub client: NamecheapClient,
    pub format: OutputFormat,
    pub quiet: bool,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        profile,
        sandbox,
        output,
        config: config_path,
        quiet,
        verbose: _,
        command,
    } = cli;

    match command {
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "namecheap",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Command::Config(cmd) => config_cmd::run(config_path.as_deref(), cmd, quiet),
        Command::Domain(cmd) => {
            let ctx = build_ctx(config_path.as_deref(), &profile, sandbox, output, quiet)?;
            domain::run(&ctx, cmd).await
        }
        Command::Dns(cmd) => {
            let ctx = build_ctx(config_path.as_deref(), &profile, sandbox, output, quiet)?;
            dns::run(&ctx, cmd).await
        }
        Command::Privacy(cmd) => {
            let ctx = build_ctx(config_path.as_deref(), &profile, sandbox, output, quiet)?;
            privacy::run(&ctx, cmd).await
        }
        Command::Account(cmd) => {
            let ctx = build_ctx(config_path.as_deref(), &profile, sandbox, output, quiet)?;
            account::run(&ctx, cmd).await
        }
    }
}

fn build_ctx(
    config_path: Option<&Path>,
    profile: &str,
    sandbox: bool,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<Ctx> {
    let path = config::config_path(config_path)?;
    let file = config::load(&path)?;
    let (credentials, sandbox) = config::resolve(&file, profile, sandbox)?;
    let client = NamecheapClient::new(credentials, sandbox)?;
    Ok(Ctx {
        client,
        format,
        quiet,
    })
}
