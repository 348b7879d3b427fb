use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use folio::config::{read_config, Config};
use folio::export::export_site;
use folio::logger::configure_logger;
use folio::server::server_run;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Serve the site over HTTP
    Serve(ServeArgs),
    /// Export the site as a static tree
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ServeArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BuildArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Base URL used for feed links, overriding the configured one
    #[arg(short, long)]
    base_url: Option<String>,
}

fn open_config(cfg_path: &PathBuf) -> anyhow::Result<Config> {
    let config = read_config(cfg_path)
        .with_context(|| format!("Loading configuration from {}", cfg_path.display()))?;
    configure_logger(&config).context("Configuring logger")?;
    Ok(config)
}

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args {
        Args::Serve(args) => {
            let config = open_config(&args.config)?;
            server_run(config).await?;
        }
        Args::Build(args) => {
            let config = open_config(&args.config)?;
            let base_url = match args.base_url {
                Some(base_url) => base_url,
                None => config.site.base_url.clone(),
            };
            export_site(&config, &base_url)?;
        }
    }

    Ok(())
}
