pub mod secret;

use anyhow::Result;
use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "worker-versions",
    author = "The Wrangler Team <wrangler@cloudflare.com>",
    setting = AppSettings::ArgRequiredElseHelp,
    setting = AppSettings::DeriveDisplayOrder,
    setting = AppSettings::VersionlessSubcommands
)]
pub struct Cli {
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, StructOpt)]
#[structopt(rename_all = "lower")]
pub enum Command {
    /// Generate a secret that can be referenced in a Worker, by uploading a new version
    #[structopt(name = "secret")]
    Secret(secret::Secret),
}

/// The Worker a command acts on.
#[derive(Debug, Clone, StructOpt)]
pub struct ScriptArgs {
    /// Name of the Worker
    #[structopt(long, short = "n")]
    pub name: String,

    /// Account the Worker belongs to
    #[structopt(long, env = "CF_ACCOUNT_ID")]
    pub account_id: String,
}

/// Annotations for the version being created.
#[derive(Debug, Clone, StructOpt)]
pub struct VersionArgs {
    /// Description of this version
    #[structopt(long)]
    pub message: Option<String>,

    /// A tag for this version
    #[structopt(long)]
    pub tag: Option<String>,

    /// Send usage metrics with the upload (true or false)
    #[structopt(long)]
    pub send_metrics: Option<bool>,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Secret(secret) => secret::secret(secret).await,
    }
}
