use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use podlex_config::BuildConfig;

mod enrich;
mod persist;
mod pipeline;
mod sources;

#[cfg(test)]
mod tests;

/// Builds the English-Russian word dictionary used by the podcast player
#[derive(Parser, Debug)]
#[command(name = "podlex", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON config file; missing fields take their defaults
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline (default)
    Build(BuildArgs),
    /// Remove abbreviations and merge phrasal verbs without network access
    ApplyUpdates(UpdateArgs),
    /// Print totals of a dictionary artifact
    Stats {
        #[arg(long, value_name = "PATH")]
        dictionary: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct BuildArgs {
    /// Stop adding word-list entries at this many words
    #[arg(long)]
    target: Option<usize>,

    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    curated: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    phrasal: Option<PathBuf>,

    /// Skip remote translation services
    #[arg(long)]
    offline: bool,

    /// Collect alternate translations (slow, one request per word)
    #[arg(long)]
    synonyms: bool,

    /// Words translated one at a time after the batch phase
    #[arg(long)]
    individual_cap: Option<usize>,
}

impl BuildArgs {
    fn apply(self, config: &mut BuildConfig) {
        if let Some(target) = self.target {
            config.target_size = target;
        }
        if let Some(path) = self.dictionary {
            config.paths.dictionary = path;
        }
        if let Some(path) = self.curated {
            config.paths.curated = path;
        }
        if let Some(path) = self.phrasal {
            config.paths.phrasal = path;
        }
        if self.offline {
            config.enrich.enabled = false;
        }
        if self.synonyms {
            config.enrich.synonyms = true;
        }
        if let Some(cap) = self.individual_cap {
            config.enrich.individual_cap = cap;
        }
    }
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    phrasal: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => BuildConfig::from_file(path).context("Failed to load config")?,
        None => BuildConfig::new(),
    };

    let stats = match cli.command.unwrap_or(Command::Build(BuildArgs::default())) {
        Command::Build(args) => {
            args.apply(&mut config);
            pipeline::run_build(&config).await?
        }
        Command::ApplyUpdates(args) => {
            if let Some(path) = args.dictionary {
                config.paths.dictionary = path;
            }
            if let Some(path) = args.phrasal {
                config.paths.phrasal = path;
            }
            pipeline::run_apply_updates(&config)?
        }
        Command::Stats { dictionary } => {
            let path = dictionary.unwrap_or(config.paths.dictionary);
            pipeline::run_stats(&path)?
        }
    };

    println!("{stats}");
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("podlex=debug,podlex_core=debug,podlex_lang_en_ru=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
