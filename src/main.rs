use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use marquee::core::config::{self, CliOverrides};
use marquee::tui;

#[derive(Parser)]
#[command(name = "marquee", about = "Terminal catalog browser")]
struct Args {
    /// Catalog API base URL (page number and `.json` are appended)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Poster image base URL
    #[arg(long)]
    image_base_url: Option<String>,

    /// Catalog title shown in the header
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to marquee.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("marquee.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("marquee: {e}");
            std::process::exit(2);
        }
    };

    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            api_base_url: args.api_base_url,
            image_base_url: args.image_base_url,
            title: args.title,
        },
    );

    log::info!(
        "Marquee starting up: catalog '{}' at {}",
        resolved.title,
        resolved.api_base_url
    );

    tui::run(resolved)
}
