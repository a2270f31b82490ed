#![cfg_attr(feature = "strict", deny(warnings))]

use structopt::StructOpt;

use worker_versions::terminal::message;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::from_args();
    if let Err(e) = cli::run(cli).await {
        message::user_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
