use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use spritepress::server::{serve, ServerConfig};
use spritepress::{SheetBuilder, SheetConfig};

#[derive(Parser)]
#[command(name = "spritepress", version, about = "Sprite-sheet composition service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
        /// Directory to store and serve generated sheets from
        #[arg(long, default_value = "sprites")]
        sprites_dir: PathBuf,
        /// Base URL used in returned sprite links (defaults to localhost:port)
        #[arg(long)]
        public_base_url: Option<String>,
        /// Per-fetch timeout in milliseconds
        #[arg(long, default_value_t = 30000)]
        timeout_ms: u64,
    },
    /// Build one sheet from the given image URLs and write it locally
    Pack {
        /// Image URLs, packed left to right in the order given
        #[arg(required = true)]
        urls: Vec<String>,
        /// Output PNG path
        #[arg(long, default_value = "sprite.png")]
        out: PathBuf,
        /// Output CSS path
        #[arg(long, default_value = "sprite.css")]
        css: PathBuf,
        /// Per-fetch timeout in milliseconds
        #[arg(long, default_value_t = 30000)]
        timeout_ms: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            sprites_dir,
            public_base_url,
            timeout_ms,
        } => {
            let server_config = ServerConfig {
                port,
                sprites_dir,
                public_base_url: public_base_url
                    .unwrap_or_else(|| format!("http://localhost:{}", port)),
            };
            let sheet_config = SheetConfig {
                timeout_ms,
                ..Default::default()
            };
            serve(server_config, sheet_config).context("server exited")?;
        }
        Command::Pack {
            urls,
            out,
            css,
            timeout_ms,
        } => {
            let sheet_config = SheetConfig {
                timeout_ms,
                sheet_ref: out.to_string_lossy().into_owned(),
                ..Default::default()
            };
            let builder = SheetBuilder::new(sheet_config)?;
            let output = builder
                .build_sheet(&urls)
                .context("failed to build sheet")?;
            std::fs::write(&out, &output.png)
                .with_context(|| format!("failed to write {:?}", out))?;
            std::fs::write(&css, &output.stylesheet)
                .with_context(|| format!("failed to write {:?}", css))?;
            println!(
                "wrote {:?} ({}x{}, {} images) and {:?}",
                out,
                output.layout.width,
                output.layout.height,
                output.layout.slots.len(),
                css
            );
        }
    }

    Ok(())
}
