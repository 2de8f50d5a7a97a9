//! Command-line interface for `LinkML` artifact generation
//!
//! Every command renders its artifact completely before writing it to
//! standard output. Logs go to standard error, so stdout carries nothing but
//! the artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::ArtifactConfig;
use crate::id::{DEFAULT_ID_LENGTH, generate_id};
use crate::pipeline;

/// Generate JSON-LD contexts, documentation indexes and TypeScript
/// declarations from `LinkML` schemas
#[derive(Parser, Debug)]
#[command(name = "linkml-artifacts", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (YAML, `${VAR:-default}` substitution supported)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the JSON-LD context of a schema
    Context {
        /// Schema file
        schema: PathBuf,
    },

    /// Print the documentation index of every schema in a directory
    Docs {
        /// Directory holding the schema files
        schema_dir: PathBuf,
    },

    /// Print TypeScript declarations for a schema
    Typescript {
        /// Schema file
        schema: PathBuf,
    },

    /// Print a random identifier
    GenId {
        /// Number of characters
        #[arg(short, long, default_value_t = DEFAULT_ID_LENGTH)]
        length: usize,
    },
}

impl Cli {
    /// Configure the tracing subscriber from the verbosity flags; `RUST_LOG`
    /// takes precedence when set
    pub fn init_logging(&self) {
        let level = if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A subscriber may already be installed when running in-process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    fn load_config(&self) -> anyhow::Result<ArtifactConfig> {
        match &self.config {
            Some(path) => {
                debug!(config = %path.display(), "loading configuration");
                ArtifactConfig::load(path)
                    .with_context(|| format!("failed to load configuration '{}'", path.display()))
            }
            None => Ok(ArtifactConfig::default()),
        }
    }
}

/// Execute the parsed command line and write the artifact to stdout
///
/// # Errors
///
/// Returns an error if the configuration, any schema source or the output
/// cannot be processed. Nothing is written to stdout in that case.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;

    let artifact = match &cli.command {
        Commands::Context { schema } => pipeline::context_artifact(schema, &config)
            .with_context(|| format!("failed to build context for '{}'", schema.display()))?,
        Commands::Docs { schema_dir } => {
            ensure_directory(schema_dir)?;
            pipeline::doc_index_artifact(schema_dir, &config).with_context(|| {
                format!("failed to build documentation index for '{}'", schema_dir.display())
            })?
        }
        Commands::Typescript { schema } => pipeline::typescript_artifact(schema, &config)
            .with_context(|| format!("failed to build TypeScript for '{}'", schema.display()))?,
        Commands::GenId { length } => format!("{}\n", generate_id(*length)),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(artifact.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write output")?;

    info!(bytes = artifact.len(), "artifact written");
    Ok(())
}

fn ensure_directory(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        bail!("'{}' is not a directory\n\nUsage: linkml-artifacts docs <SCHEMA_DIR>", path.display());
    }
    Ok(())
}
