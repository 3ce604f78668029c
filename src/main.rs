use clap::Parser;
use dotenvy::dotenv;
use swimdesk::AppContext;
use swimdesk::cli::{Cli, run};
use swimdesk::logging::init_logging;
use swimdesk_config::ClientConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging("warn");

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let ctx = match AppContext::open(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("\n❌ Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&ctx, cli.command).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}
