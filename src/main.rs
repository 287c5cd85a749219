mod api;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "echochat", about = "Terminal chat client for the EchoGPT API")]
struct Args {
    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to echochat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("echochat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match core::config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("echochat: {e}");
            std::process::exit(1);
        }
    };
    let resolved = core::config::resolve(&config, args.base_url.as_deref());

    log::info!("EchoChat starting up (base_url: {})", resolved.base_url);

    tui::run(resolved)
}
