use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use restbench_core::config::{self, CONFIG_FILE_NAME, ImportConfig};
use restbench_core::import::distinct_tags;
use restbench_core::spec::SpecDocument;
use restbench_core::synth::RequestDescriptor;
use restbench_core::{convert, load_document};

#[derive(Parser)]
#[command(
    name = "restbench",
    about = "OpenAPI import tools for the restbench workbench",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a specification loads and report its shape
    Validate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the validated, dereferenced document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Convert a specification into an importable request collection
    Convert {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Project the imported requests will belong to
        #[arg(short, long, default_value_t = 1)]
        project_id: i64,

        /// Base URL override (defaults to the document's first server)
        #[arg(long)]
        base_url: Option<String>,

        /// Write the collection here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a new restbench configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

/// The convert output: folder names the import will create, then the
/// request records themselves.
#[derive(Serialize)]
struct Collection<'a> {
    folders: Vec<&'a str>,
    requests: &'a [RequestDescriptor],
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(&input),

        Commands::Inspect { input, format } => cmd_inspect(&input, format),

        Commands::Convert {
            input,
            project_id,
            base_url,
            output,
        } => cmd_convert(&input, project_id, base_url, output),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "restbench", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the optional project config from the current directory.
fn try_load_config() -> Result<ImportConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    let loaded = config::load_config(&path).map_err(|e| anyhow::anyhow!(e))?;
    if loaded.is_some() {
        log::debug!("using configuration from {}", path.display());
    }
    Ok(loaded.unwrap_or_default())
}

fn load_spec(path: &Path) -> Result<SpecDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let document = load_document(&content)?;
    Ok(document)
}

fn cmd_validate(input: &Path) -> Result<()> {
    let document = load_spec(input)?;
    println!(
        "OK: {} {} ({} paths, {} operations)",
        document.info.title,
        document.info.version,
        document.paths.len(),
        document.operation_count(),
    );
    Ok(())
}

fn cmd_inspect(input: &Path, format: InspectFormat) -> Result<()> {
    let document = load_spec(input)?;
    let rendered = match format {
        InspectFormat::Yaml => serde_yaml_ng::to_string(&document)?,
        InspectFormat::Json => serde_json::to_string_pretty(&document)?,
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_convert(
    input: &Path,
    project_id: i64,
    base_url: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?;
    let document = load_spec(input)?;

    let base = base_url.or(cfg.base_url);
    let requests = convert(&document, project_id, base.as_deref());
    if requests.is_empty() {
        // Distinct from a load failure: the document is valid but has
        // nothing the workbench can import.
        bail!("no importable endpoints found in {}", input.display());
    }

    let folders = if cfg.folders_from_tags {
        distinct_tags(&requests)
    } else {
        Vec::new()
    };
    let collection = Collection {
        folders,
        requests: &requests,
    };
    let rendered = serde_json::to_string_pretty(&collection)?;

    let destination = output.or_else(|| cfg.output.clone().map(PathBuf::from));
    match destination {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "wrote {} requests ({} folders) to {}",
                requests.len(),
                collection.folders.len(),
                path.display(),
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(&path, config::default_config_content())
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
