use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drawing_features::{
    extract_color_profile, AnalysisError, CorpusAnalyzer, CorpusConfig, FeatureExtractor,
    QuantizerConfig,
};

#[derive(Parser)]
#[command(name = "drawing_features")]
#[command(about = "Color palette and ink coverage features for drawing corpora")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every drawing in a directory and emit one JSON record per drawing
    Analyze {
        /// Directory containing the drawings
        dir: Option<PathBuf>,

        /// Underscore-delimited filename schema (e.g. "category_timecond_participant")
        #[arg(short, long)]
        schema: Option<String>,

        /// Drawing file extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Color merge tolerance (0-100)
        #[arg(short, long)]
        tolerance: Option<u8>,

        /// Maximum number of colors kept per drawing
        #[arg(short, long)]
        max_colors: Option<usize>,

        /// Process drawings in parallel
        #[arg(long)]
        parallel: bool,

        /// JSON corpus configuration; command line options override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the color table and features of a single drawing
    Profile {
        /// Drawing to profile
        image: PathBuf,

        /// Color merge tolerance (0-100)
        #[arg(short, long)]
        tolerance: Option<u8>,

        /// Maximum number of colors kept
        #[arg(short, long)]
        max_colors: Option<usize>,
    },
    /// Write a default corpus configuration file
    InitConfig {
        /// Output configuration path
        output: PathBuf,

        /// Directory containing the drawings
        #[arg(short, long, default_value = "drawings")]
        dir: PathBuf,

        /// Underscore-delimited filename schema
        #[arg(short, long)]
        schema: String,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drawing_features=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            dir,
            schema,
            extension,
            tolerance,
            max_colors,
            parallel,
            config,
            output,
        } => {
            let overrides = Overrides {
                dir,
                schema,
                extension,
                tolerance,
                max_colors,
                parallel,
            };
            run_analyze(config.as_deref(), overrides, output.as_deref())
        }
        Commands::Profile {
            image,
            tolerance,
            max_colors,
        } => run_profile(&image, tolerance, max_colors),
        Commands::InitConfig {
            output,
            dir,
            schema,
        } => run_init_config(&output, dir, schema),
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        eprintln!("Suggestion: {}", error.user_message());
        process::exit(1);
    }
}

/// Command line values layered over a config file
struct Overrides {
    dir: Option<PathBuf>,
    schema: Option<String>,
    extension: Option<String>,
    tolerance: Option<u8>,
    max_colors: Option<usize>,
    parallel: bool,
}

fn run_analyze(
    config_path: Option<&Path>,
    overrides: Overrides,
    output: Option<&Path>,
) -> Result<(), AnalysisError> {
    let mut config = match config_path {
        Some(path) => {
            let config = CorpusConfig::from_json_file(path)?;
            tracing::info!(config = %path.display(), "loaded configuration");
            config
        }
        None => {
            let dir = overrides.dir.clone().ok_or_else(|| {
                AnalysisError::invalid_parameter("dir", "<missing>", "pass a directory or --config")
            })?;
            let schema = overrides.schema.clone().ok_or_else(|| {
                AnalysisError::invalid_parameter("schema", "<missing>", "pass --schema or --config")
            })?;
            CorpusConfig::new(dir, schema)
        }
    };

    if let Some(dir) = overrides.dir {
        config.input_dir = dir;
    }
    if let Some(schema) = overrides.schema {
        config.schema = schema;
    }
    if let Some(extension) = overrides.extension {
        config.image_extension = extension;
    }
    if let Some(tolerance) = overrides.tolerance {
        config.quantizer.tolerance = tolerance;
    }
    if let Some(max_colors) = overrides.max_colors {
        config.quantizer.max_colors = max_colors;
    }
    config.parallel |= overrides.parallel;

    let table = CorpusAnalyzer::new(&config)?.analyze(&config.input_dir)?;

    match output {
        Some(path) => {
            table.to_json_file(path)?;
            tracing::info!(output = %path.display(), rows = table.len(), "results written");
        }
        None => println!("{}", table.to_json()?),
    }
    Ok(())
}

fn run_profile(
    image: &Path,
    tolerance: Option<u8>,
    max_colors: Option<usize>,
) -> Result<(), AnalysisError> {
    let defaults = QuantizerConfig::default();
    let quantizer = QuantizerConfig::new(
        tolerance.unwrap_or(defaults.tolerance),
        max_colors.unwrap_or(defaults.max_colors),
    )?;

    let table = extract_color_profile(image, quantizer)?;
    let report = serde_json::json!({
        "image": image,
        "prop_nonwhitepx": FeatureExtractor::non_background_proportion(&table),
        "numcolors": FeatureExtractor::distinct_color_count(&table),
        "coverage": table.coverage(),
        "colors": table,
    });

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| AnalysisError::config("cannot serialize color profile", e))?;
    println!("{}", json);
    Ok(())
}

fn run_init_config(output: &Path, dir: PathBuf, schema: String) -> Result<(), AnalysisError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AnalysisError::config(format!("cannot create {}", parent.display()), e)
        })?;
    }

    let config = CorpusConfig::new(dir, schema);
    config.validate()?;
    config.to_json_file(output)?;

    eprintln!("Configuration saved to {}", output.display());
    eprintln!("  Input:     {}", config.input_dir.display());
    eprintln!("  Extension: {}", config.image_extension);
    eprintln!("  Schema:    {}", config.schema);
    eprintln!(
        "  Quantizer: tolerance {}, max {} colors",
        config.quantizer.tolerance, config.quantizer.max_colors
    );
    Ok(())
}
