//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "namecheap",
    version,
    about = "Manage Namecheap domains, DNS records and privacy from the command line",
    propagate_version = true
)]
pub struct Cli {
    /// Config profile to use.
    #[arg(long, global = true, default_value = "default")]
    pub profile: String,

    /// Use the sandbox API endpoint.
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Output format.
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Path to the config file (default: platform config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimal output.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging on stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Domain registration and lookup.
    #[command(subcommand)]
    Domain(DomainCommand),
    /// Hosted-DNS records, nameservers and email forwarding.
    #[command(subcommand)]
    Dns(DnsCommand),
    /// Domain privacy (WhoisGuard).
    #[command(subcommand)]
    Privacy(PrivacyCommand),
    /// Account balance and pricing.
    #[command(subcommand)]
    Account(AccountCommand),
    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate a shell completion script.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum DomainCommand {
    /// List domains in the account.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        /// Only show domains expiring within N days.
        #[arg(long, value_name = "DAYS")]
        expiring_in: Option<i64>,
    },
    /// Check availability of one or more domains.
    Check {
        #[arg(required = true)]
        domains: Vec<String>,
        /// Fetch registration pricing for available domains.
        #[arg(long)]
        pricing: bool,
    },
    /// Detailed information about one domain.
    Info { domain: String },
    /// Contact roles registered for a domain.
    Contacts { domain: String },
    /// List supported TLDs.
    Tlds {
        /// Only show TLDs registerable through the API.
        #[arg(long)]
        registerable: bool,
    },
    /// Renew a domain.
    Renew {
        domain: String,
        #[arg(long, short, default_value_t = 1)]
        years: u32,
        /// Skip confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Lock a domain against transfers.
    Lock { domain: String },
    /// Unlock a domain for transfer.
    Unlock { domain: String },
}

#[derive(Subcommand)]
pub enum DnsCommand {
    /// List DNS records for a domain.
    List {
        domain: String,
        /// Filter by record type.
        #[arg(long, short = 't', value_name = "TYPE")]
        record_type: Option<String>,
        /// Filter by record name.
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
    /// Add one DNS record (no-op if an identical record exists).
    Add {
        domain: String,
        /// Record type (A, AAAA, CNAME, MX, TXT, ...).
        record_type: String,
        /// Record name relative to the zone; '@' for the apex.
        name: String,
        value: String,
        #[arg(long, default_value_t = namecheap_api::DEFAULT_TTL)]
        ttl: u32,
        /// Priority (MX and MXE records only).
        #[arg(long)]
        priority: Option<u32>,
    },
    /// Delete records matching the given criteria.
    Delete {
        domain: String,
        #[arg(long, short = 't', value_name = "TYPE")]
        record_type: Option<String>,
        #[arg(long, short = 'n')]
        name: Option<String>,
        #[arg(long, short = 'v')]
        value: Option<String>,
        /// Delete all records (dangerous).
        #[arg(long)]
        all: bool,
        /// Skip confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show the domain's nameservers.
    Nameservers { domain: String },
    /// Point the domain at custom nameservers.
    SetNameservers {
        domain: String,
        #[arg(required = true)]
        nameservers: Vec<String>,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Switch the domain back to default DNS.
    ResetNameservers {
        domain: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Export DNS records.
    Export {
        domain: String,
        #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
    },
    /// Show email-forwarding rules.
    EmailForwarding { domain: String },
    /// Replace email-forwarding rules (mailbox=destination pairs).
    SetEmailForwarding {
        domain: String,
        /// Rules as mailbox=destination, e.g. info=me@example.net
        #[arg(required = true)]
        rules: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum PrivacyCommand {
    /// List privacy subscriptions.
    List {
        #[arg(long, value_enum, default_value_t = ListTypeArg::All)]
        list_type: ListTypeArg,
    },
    /// Enable privacy, forwarding masked email to the given address.
    Enable { domain: String, email: String },
    /// Disable privacy.
    Disable {
        domain: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Renew the privacy subscription.
    Renew {
        domain: String,
        /// Years to renew (1-9).
        #[arg(long, short, default_value_t = 1)]
        years: u32,
        /// Skip confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Rotate the masked forwarding address.
    ChangeEmail { domain: String },
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Show account balances.
    Balance,
    /// Show pricing for a TLD (or all TLDs).
    Pricing {
        tld: Option<String>,
        /// Pricing action.
        #[arg(long, default_value = "REGISTER")]
        action: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a skeleton config file.
    Init,
    /// Print the config file path.
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Bind,
    Yaml,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTypeArg {
    All,
    Alloted,
    Free,
    Discard,
}

impl From<ListTypeArg> for namecheap_api::WhoisguardListType {
    fn from(arg: ListTypeArg) -> Self {
        match arg {
            ListTypeArg::All => Self::All,
            ListTypeArg::Alloted => Self::Alloted,
            ListTypeArg::Free => Self::Free,
            ListTypeArg::Discard => Self::Discard,
        }
    }
}
