use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::info;

use qrstudio::template::TemplateClient;
use qrstudio::{export, Compositor, Config, DesignOptions, DirAssets, QrcodeCodec, Size};

#[derive(Parser)]
#[command(name = "qrstudio")]
#[command(about = "Design, preview and export styled QR codes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a payload to an SVG or PNG file
    Render {
        /// Text encoded in the symbol
        #[arg(long, short = 'p')]
        payload: String,

        /// JSON file holding a designOptions object
        #[arg(long, short = 'o')]
        options: Option<PathBuf>,

        /// Side of the square output in pixels (defaults to QRSTUDIO_RENDER_SIZE)
        #[arg(long, short = 's')]
        size: Option<u32>,

        /// Output file; the extension picks the format (.svg or .png)
        #[arg(long)]
        out: PathBuf,
    },
    /// Browse saved templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List saved templates
    List,
    /// Print one template as JSON
    Show {
        /// Template id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid QRSTUDIO_* configuration")?;

    match cli.command {
        Commands::Render { payload, options, size, out } => render(&config, &payload, options, size, &out),
        Commands::Templates { command } => templates(&config, command).await,
    }
}

fn render(config: &Config, payload: &str, options: Option<PathBuf>, size: Option<u32>, out: &Path) -> Result<()> {
    let options = match options {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            DesignOptions::from_json(&json).with_context(|| format!("Invalid design options in {}", path.display()))?
        }
        None => DesignOptions::default(),
    };
    let size = size.unwrap_or(config.render_size());

    let matrix = QrcodeCodec.encode_sync(payload, options.resolve().ec_level).context("Failed to encode payload")?;
    let composite = Compositor::new(config.render()).compose_modules(&options, Some(&matrix), Size::square(size as f64));

    let assets = DirAssets::new(config.asset_root());
    let format = export(&composite, out, &assets).with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote {format:?} preview of {} modules to {}", matrix.width(), out.display());
    println!("{}", out.display());
    Ok(())
}

async fn templates(config: &Config, command: TemplateCommands) -> Result<()> {
    let mut client = TemplateClient::new(config.require_api_base_url()?);
    if let Some(token) = config.api_token() {
        client = client.with_token(token);
    }

    match command {
        TemplateCommands::List => {
            let templates = client.list().await.context("Failed to list templates")?;
            for t in templates {
                println!("{}\t{}\t{}", t.id, t.name, t.design_options.to_json()?);
            }
        }
        TemplateCommands::Show { id } => {
            let template = client.get(&id).await.with_context(|| format!("Failed to load template {id}"))?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
    }
    Ok(())
}
