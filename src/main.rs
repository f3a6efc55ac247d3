use clap::{Parser, Subcommand};
use sitemapper::{
    MemoryStorage, config, input, output, write_sitemaps, write_sitemaps_with_storage,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Flags shared by commands that generate sitemaps. Each one overrides the
/// matching key from the config file.
#[derive(clap::Args, Clone)]
struct GenerateArgs {
    /// URL list: a `.json` array of entries, or one location per line
    input: PathBuf,

    /// Prefix for URLs of generated files (e.g. https://example.com/)
    #[arg(long)]
    base_url: Option<String>,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// File stem for generated files
    #[arg(long)]
    filename: Option<String>,

    /// Maximum URLs per file (0 = unlimited)
    #[arg(long, allow_hyphen_values = true)]
    max_entries: Option<i64>,

    /// Maximum bytes per file (0 = unlimited)
    #[arg(long, allow_hyphen_values = true)]
    max_bytes: Option<i64>,
}

impl GenerateArgs {
    /// Command-line overrides as a sparse TOML table.
    fn overlay(&self) -> toml::Value {
        let mut table = toml::Table::new();
        if let Some(url) = &self.base_url {
            table.insert("base_url".into(), toml::Value::String(url.clone()));
        }
        if let Some(dir) = &self.output {
            table.insert(
                "output_dir".into(),
                toml::Value::String(dir.to_string_lossy().into_owned()),
            );
        }
        if let Some(name) = &self.filename {
            table.insert("base_filename".into(), toml::Value::String(name.clone()));
        }
        if let Some(n) = self.max_entries {
            table.insert("max_entries_per_file".into(), toml::Value::Integer(n));
        }
        if let Some(n) = self.max_bytes {
            table.insert("max_bytes_per_file".into(), toml::Value::Integer(n));
        }
        toml::Value::Table(table)
    }
}

#[derive(Parser)]
#[command(name = "sitemapper")]
#[command(about = "Write sitemap XML files, split into parts with an index when needed")]
#[command(long_about = "\
Write sitemap XML files, split into parts with an index when needed

URLs are written in input order. When they exceed the per-file URL or byte
limit the output is split:

  out/
  ├── sitemap.xml      # index → sitemap-1.xml, sitemap-2.xml
  ├── sitemap-1.xml
  └── sitemap-2.xml

Otherwise sitemap.xml holds every URL directly.

Input is either a JSON array of entries (loc, changefreq, lastmod, priority,
images, alternates) or a text file with one URL per line.

Run 'sitemapper gen-config' to generate a documented sitemap.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; flags override its values)
    #[arg(long, default_value = "sitemap.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write sitemap files for the URLs in INPUT
    Generate(GenerateArgs),
    /// Dry run: report the files that would be written
    Check(GenerateArgs),
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Command::Generate(args) => {
            let options = config::load_config(&cli.config, Some(args.overlay()))?;
            let entries = input::load_entries(&args.input)?;
            tracing::info!(
                urls = entries.len(),
                output = %options.output_dir.display(),
                "generating sitemaps"
            );
            let output_dir = options.output_dir.clone();
            let summary = write_sitemaps(options, &entries)?;
            output::print_generate_output(&summary, &output_dir);
        }
        Command::Check(args) => {
            let options = config::load_config(&cli.config, Some(args.overlay()))?;
            let entries = input::load_entries(&args.input)?;
            let summary = write_sitemaps_with_storage(MemoryStorage::new(), options, &entries)?;
            output::print_check_output(&summary);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
