pub mod types;
pub mod config;
pub mod error;
pub mod data;
pub mod builder;
pub mod export;
pub mod render;
pub mod server;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the CSV export and a standalone map page into the output directory
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Serve the dashboard with the embedded map
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config } => {
            println!("Generating site with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            // 1. Load Data
            let attractions = data::load_data(&app_config)?;

            // 2. Build the map structure
            let doc = builder::build_map(&attractions)?;

            // 3. Write artifacts
            let out_dir = &app_config.output.dir;
            fs::create_dir_all(out_dir)
                .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;

            let csv_path = out_dir.join(export::CSV_FILE_NAME);
            export::write_csv(&csv_path, &attractions)?;
            println!("Wrote {:?}", csv_path);

            let map_path = out_dir.join("map.html");
            fs::write(&map_path, render::render_map_html(&doc))
                .with_context(|| format!("Failed to write {:?}", map_path))?;
            println!("Wrote {:?}", map_path);

            let index_path = out_dir.join("index.html");
            let dashboard =
                render::render_dashboard_html(&app_config.page, "map.html", export::CSV_FILE_NAME);
            fs::write(&index_path, dashboard)
                .with_context(|| format!("Failed to write {:?}", index_path))?;
            println!("Wrote {:?}", index_path);

            println!("Generation complete!");
        }
        Commands::Serve { config } => {
            println!("Serving map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let attractions = data::load_data(&app_config)?;

            server::start_server(app_config, attractions).await?;
        }
    }

    Ok(())
}
