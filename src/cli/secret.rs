use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use worker_versions::commands::secret::{self as commands, Target};
use worker_versions::settings::global_user::GlobalUser;
use worker_versions::versions::secrets::RotateOptions;

use super::{ScriptArgs, VersionArgs};

#[derive(Debug, Clone, StructOpt)]
#[structopt(rename_all = "lower")]
pub enum Secret {
    /// Create or update a secret variable for a Worker
    Put {
        /// The variable name to be accessible in the Worker
        #[structopt(index = 1)]
        key: String,
        #[structopt(flatten)]
        script: ScriptArgs,
        #[structopt(flatten)]
        version: VersionArgs,
    },
    /// Create or update several secrets from a JSON file of names to values
    Bulk {
        /// The JSON file of key-value pairs to upload
        #[structopt(index = 1, parse(from_os_str))]
        json: PathBuf,
        #[structopt(flatten)]
        script: ScriptArgs,
        #[structopt(flatten)]
        version: VersionArgs,
    },
    /// List the secrets of the versions currently deployed
    List {
        #[structopt(flatten)]
        script: ScriptArgs,
    },
}

impl From<ScriptArgs> for Target {
    fn from(args: ScriptArgs) -> Self {
        Target {
            account_id: args.account_id,
            name: args.name,
        }
    }
}

impl From<VersionArgs> for RotateOptions {
    fn from(args: VersionArgs) -> Self {
        RotateOptions {
            message: args.message,
            tag: args.tag,
            send_metrics: args.send_metrics,
        }
    }
}

pub async fn secret(secret: Secret) -> Result<()> {
    log::info!("Getting User settings");
    let user = GlobalUser::new()?;

    match secret {
        Secret::Put {
            key,
            script,
            version,
        } => commands::put_secret(&key, &user, &script.into(), version.into()).await,
        Secret::Bulk {
            json,
            script,
            version,
        } => commands::bulk_put_secrets(&json, &user, &script.into(), version.into()).await,
        Secret::List { script } => commands::list_secrets(&user, &script.into()).await,
    }
}
