//! @ai:module:intent CLI for the meme token evaluation harness
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meme_eval::{
    config::{EvalConfig, TestSelection},
    corpus::{self, CorpusLoader, CorpusLoaderTrait, TokenSample},
    evaluator::AccuracyEvaluator,
    metrics::{FailurePolicy, MetricsAggregator},
    oracle::{ClassificationOracle, MockOracle, OpenAiOracle},
    report::{text_report, ReportGenerator},
    runner::LoadDriver,
};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONFIG_FILE: &str = "meme-eval.toml";

#[derive(Parser)]
#[command(name = "meme-eval")]
#[command(about = "Accuracy and load evaluation for LLM meme token reliability scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run accuracy and/or performance evaluations
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which evaluation to run
        #[arg(short, long, value_enum)]
        test: Option<TestSelection>,

        /// Number of distinct samples in the load test
        #[arg(short, long)]
        samples: Option<usize>,

        /// Maximum requests in flight during the load test
        #[arg(long)]
        concurrency: Option<usize>,

        /// How many times the load test sample set is repeated
        #[arg(short, long)]
        repeat: Option<usize>,

        /// How failed requests enter the confusion matrix
        #[arg(long, value_enum)]
        failures: Option<FailurePolicy>,

        /// Score with the offline heuristic instead of calling the API
        #[arg(long)]
        dry_run: bool,

        /// Output directory for results
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify a single corpus token and print the analysis
    Analyze {
        /// Token symbol (case-insensitive)
        #[arg(long)]
        symbol: String,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Score with the offline heuristic instead of calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// List corpus tokens
    List {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only scam tokens
        #[arg(long, conflicts_with = "reliable")]
        scam: bool,

        /// Only reliable tokens
        #[arg(long)]
        reliable: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("meme_eval=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            test,
            samples,
            concurrency,
            repeat,
            failures,
            dry_run,
            output,
        } => {
            let mut config = load_or_default_config(config)?;

            if let Some(test) = test {
                config.run.test = test;
            }
            if let Some(samples) = samples {
                config.run.sample_count = samples;
            }
            if let Some(concurrency) = concurrency {
                config.run.concurrency_level = concurrency;
            }
            if let Some(repeat) = repeat {
                config.run.repeat_count = repeat;
            }
            if let Some(failures) = failures {
                config.run.failure_policy = failures;
            }
            if let Some(output) = output {
                config.paths.results_dir = output;
            }
            config.run.dry_run |= dry_run;

            config.validate()?;
            run_evaluations(config).await
        }
        Commands::Analyze {
            symbol,
            config,
            dry_run,
        } => {
            let config = load_or_default_config(config)?;
            analyze_token(config, &symbol, dry_run).await
        }
        Commands::List {
            config,
            scam,
            reliable,
        } => list_tokens(load_or_default_config(config)?, scam, reliable),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Pick the oracle and run the selected evaluations
/// @ai:effects network, fs:read, fs:write
async fn run_evaluations(config: EvalConfig) -> Result<()> {
    let tokens = load_corpus(&config)?;

    if config.run.dry_run {
        tracing::info!("Running in dry-run mode with the heuristic oracle");
        run_with_oracle(Arc::new(MockOracle::new()), &config, &tokens).await
    } else {
        tracing::info!("Using {} at {}", config.api.model, config.api.base_url);
        let oracle = OpenAiOracle::new(config.api.clone())?;
        run_with_oracle(Arc::new(oracle), &config, &tokens).await
    }
}

/// @ai:effects network, fs:write
async fn run_with_oracle<O: ClassificationOracle>(
    oracle: Arc<O>,
    config: &EvalConfig,
    tokens: &[TokenSample],
) -> Result<()> {
    let aggregator = MetricsAggregator::with_policy(config.run.failure_policy);
    let reporter = ReportGenerator::new();

    if config.run.test.includes_accuracy() {
        let samples = corpus::curated_sample(tokens, config.run.reliable_samples, config.run.scam_samples);
        if samples.is_empty() {
            anyhow::bail!("Corpus has no tokens for the accuracy sample");
        }

        tracing::info!("Starting accuracy test on {} tokens", samples.len());

        let run = AccuracyEvaluator::new(oracle.clone()).evaluate(&samples).await?;
        let metrics = run.metrics(&aggregator)?;

        println!();
        println!("{}", text_report::accuracy_report(&run, &metrics));

        let dir = reporter.write_accuracy(&run, &metrics, &config.paths.results_dir)?;
        println!("Accuracy results saved to {}", dir.display());
    }

    if config.run.test.includes_performance() {
        let samples = corpus::random_sample(tokens, config.run.sample_count);

        tracing::info!(
            "Starting load test: {} tokens x {} rounds at concurrency {}",
            samples.len(),
            config.run.repeat_count,
            config.run.concurrency_level
        );

        let result = LoadDriver::new(oracle)
            .run_load_test(&samples, config.run.concurrency_level, config.run.repeat_count)
            .await?;
        let metrics = result.aggregate_metrics(&aggregator)?;

        println!();
        println!("{}", text_report::performance_report(&result.summary, &metrics));

        let dir = reporter.write_performance(&result, &metrics, &config.paths.results_dir)?;
        println!("Performance results saved to {}", dir.display());
    }

    Ok(())
}

/// @ai:intent Classify one token and print the full analysis
/// @ai:effects network, fs:read
async fn analyze_token(config: EvalConfig, symbol: &str, dry_run: bool) -> Result<()> {
    let token = match &config.paths.corpus_dir {
        Some(dir) => CorpusLoader::new().load_by_symbol(dir, symbol)?,
        None => corpus::builtin_corpus()
            .into_iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol)),
    }
    .with_context(|| format!("No token with symbol {} in the corpus", symbol))?;

    tracing::info!("Analyzing {}", token.display_name());

    let analysis = if dry_run || config.run.dry_run {
        MockOracle::new().classify(&token.to_request()).await?
    } else {
        OpenAiOracle::new(config.api.clone())?
            .classify(&token.to_request())
            .await?
    };

    println!();
    println!("{}", token.display_name());
    println!("{}", "-".repeat(40));
    println!("Reliability score: {:.2}", analysis.reliability_score);
    println!("Recommendation:    {}", analysis.recommendation);
    println!("Confidence:        {:.2}", analysis.confidence);
    println!("Actual status:     {}", if token.is_scam { "scam" } else { "reliable" });

    if !analysis.risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for factor in &analysis.risk_factors {
            println!("  - {}", factor);
        }
    }

    if !analysis.positive_factors.is_empty() {
        println!();
        println!("Positive factors:");
        for factor in &analysis.positive_factors {
            println!("  + {}", factor);
        }
    }

    Ok(())
}

/// @ai:intent Print corpus tokens, optionally filtered by label
/// @ai:effects fs:read
fn list_tokens(config: EvalConfig, scam_only: bool, reliable_only: bool) -> Result<()> {
    let tokens = load_corpus(&config)?;
    let tokens = if scam_only {
        corpus::scams(&tokens)
    } else if reliable_only {
        corpus::reliable(&tokens)
    } else {
        tokens
    };

    println!("Tokens ({}):", tokens.len());
    println!();
    println!(
        "{:<12} {:<16} {:>10} {:>14} {:>10} {:<8}",
        "Symbol", "Name", "Holders", "Liquidity", "24h %", "Label"
    );
    println!("{}", "-".repeat(75));

    for token in &tokens {
        println!(
            "{:<12} {:<16} {:>10} {:>14.0} {:>10.1} {:<8}",
            token.symbol,
            token.name,
            token.holder_count,
            token.liquidity,
            token.price_change_24h,
            if token.is_scam { "scam" } else { "reliable" }
        );
    }

    Ok(())
}

/// @ai:intent Write the default configuration
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = EvalConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Built-in corpus, or the configured TOML corpus directory
/// @ai:effects fs:read
fn load_corpus(config: &EvalConfig) -> Result<Vec<TokenSample>> {
    match &config.paths.corpus_dir {
        Some(dir) => {
            tracing::info!("Loading corpus from {}", dir.display());
            let tokens = CorpusLoader::new().load_all(dir)?;
            if tokens.is_empty() {
                anyhow::bail!("No tokens found in {}", dir.display());
            }
            Ok(tokens)
        }
        None => Ok(corpus::builtin_corpus()),
    }
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<EvalConfig> {
    match path {
        Some(p) => EvalConfig::load(&p).with_context(|| format!("Failed to load {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                Ok(EvalConfig::load(&default_path)?)
            } else {
                Ok(EvalConfig::default())
            }
        }
    }
}
