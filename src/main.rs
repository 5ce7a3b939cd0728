#![deny(warnings)]

use anyhow::Result;
use configure_auth::args::Args;
use configure_auth::default_config::locator_from_args;
use configure_auth::{Outcome, write_webserver_config};
use env_logger::Env;
use std::env;

fn init_logger() {
    let has_debug_flag = env::args().any(|s| s.eq("--debug") || s.eq("-d"));
    let default_level = if has_debug_flag { "debug" } else { "warn" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();

    let Some(args) = Args::parse() else {
        return Ok(());
    };
    let locator = locator_from_args(&args);

    if let Outcome::Written(path) = write_webserver_config(&args, locator.as_ref()).await? {
        println!("Custom webserver configuration written to {}", path.display());
    }

    Ok(())
}
