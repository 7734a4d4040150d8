use anyhow::{Context, bail};
use clap::Parser;
use deckforge::deck::{DeckConfig, run};
use deckforge::pptx::PresentationSummary;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate the themed slide deck.
#[derive(Debug, Parser)]
#[command(name = "deckforge", version, about)]
struct Cli {
    /// Load the deck from a YAML file instead of the built-in one
    #[arg(short, long, value_name = "YAML")]
    config: Option<PathBuf>,

    /// Where to write the presentation
    #[arg(short, long, value_name = "PPTX")]
    output: Option<PathBuf>,

    /// Where to write the gradient background image
    #[arg(short, long, value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Print the deck configuration as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// Re-open the saved presentation and check its slide count
    #[arg(long)]
    verify: bool,
}

impl Cli {
    /// The configured deck with the path overrides applied.
    fn deck_config(&self) -> anyhow::Result<DeckConfig> {
        let mut config = match &self.config {
            Some(path) => DeckConfig::load(path)
                .with_context(|| format!("failed to load deck configuration {}", path.display()))?,
            None => DeckConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(background) = &self.background {
            config.background = background.clone();
        }
        Ok(config)
    }
}

/// Re-open a saved presentation and check it holds `expected` slides.
fn verify_slide_count(path: &Path, expected: usize) -> anyhow::Result<()> {
    let summary = PresentationSummary::open(path)
        .with_context(|| format!("failed to re-open {}", path.display()))?;
    if summary.slide_count() != expected {
        bail!(
            "{} holds {} slides, expected {}",
            path.display(),
            summary.slide_count(),
            expected
        );
    }
    info!("verified {} slides", expected);
    Ok(())
}

/// Everything after argument parsing; stdout-bound output goes to `out`.
fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.deck_config()?;

    if cli.dump_config {
        write!(out, "{}", config.to_yaml().context("failed to serialize configuration")?)?;
        return Ok(());
    }

    let report = run(&config).context("failed to generate deck")?;
    if cli.verify {
        verify_slide_count(&report.output, report.slide_count)?;
    }

    writeln!(out, "Saved {}", report.output.display())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    execute(&cli, &mut std::io::stdout().lock())
}
