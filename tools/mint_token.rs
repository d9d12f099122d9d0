use anyhow::Context;
use clap::Parser;
use std::env;

use jobly::api::middleware::auth::JwtKeys;

/// Print a signed JWT accepted by the API
#[derive(Parser)]
struct Cli {
    username: String,

    #[arg(long)]
    admin: bool,

    /// Falls back to SECRET_KEY
    #[arg(long)]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let secret = cli
        .secret
        .or_else(|| env::var("SECRET_KEY").ok())
        .context("SECRET_KEY must be set or passed with --secret")?;

    let token = JwtKeys::new(&secret)
        .create_token(&cli.username, cli.admin)
        .context("failed to sign token")?;

    println!("{token}");
    Ok(())
}
