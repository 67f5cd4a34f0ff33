//! Wine quality prediction CLI
//!
//! Collects the eleven measurements, runs the inference pipeline and prints
//! the predicted score and category.

use clap::{Parser, Subcommand};
use vintner::{Config, Result};

#[derive(Parser)]
#[command(name = "vintner")]
#[command(about = "Predict wine quality from physicochemical measurements", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict quality for one sample (defaults to the preset measurements)
    Predict {
        #[arg(long, default_value_t = 7.4)]
        fixed_acidity: f32,
        #[arg(long, default_value_t = 0.7)]
        volatile_acidity: f32,
        #[arg(long, default_value_t = 0.0)]
        citric_acid: f32,
        #[arg(long, default_value_t = 2.0)]
        residual_sugar: f32,
        #[arg(long, default_value_t = 0.08)]
        chlorides: f32,
        #[arg(long, default_value_t = 15.0)]
        free_sulfur_dioxide: f32,
        #[arg(long, default_value_t = 46.0)]
        total_sulfur_dioxide: f32,
        #[arg(long, default_value_t = 0.996)]
        density: f32,
        #[arg(long, default_value_t = 3.3)]
        ph: f32,
        #[arg(long, default_value_t = 0.6)]
        sulphates: f32,
        #[arg(long, default_value_t = 10.0)]
        alcohol: f32,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the attribute table (ranges, defaults, transforms)
    Attributes,
    /// Artifact management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show artifact paths and model shape
    Info,
    /// Try loading both artifacts and report the result
    Validate,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Predict {
            fixed_acidity,
            volatile_acidity,
            citric_acid,
            residual_sugar,
            chlorides,
            free_sulfur_dioxide,
            total_sulfur_dioxide,
            density,
            ph,
            sulphates,
            alcohol,
            format,
        } => commands::predict(
            &config,
            vintner::WineSample {
                fixed_acidity,
                volatile_acidity,
                citric_acid,
                residual_sugar,
                chlorides,
                free_sulfur_dioxide,
                total_sulfur_dioxide,
                density,
                ph,
                sulphates,
                alcohol,
            },
            format,
        ),
        Commands::Attributes => commands::attributes(),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
            ModelCommands::Validate => commands::model_validate(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use burn::backend::ndarray::NdArrayDevice;
    use burn::backend::NdArray;
    use vintner::features::Attribute;
    use vintner::model::{QualityNetModel, StandardScaler};
    use vintner::predict::{format_prediction, Predictor};
    use vintner::WineSample;

    type InferenceBackend = NdArray<f32>;
    type InferencePredictor = Predictor<StandardScaler, QualityNetModel<InferenceBackend>>;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("model")?;
        println!("Created model/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Place the scaler and model artifacts under model/");
        println!("  3. Run 'vintner model validate' to check the artifacts");
        println!("  4. Run 'vintner predict' to score a sample");

        Ok(())
    }

    pub fn predict(config: &Config, sample: WineSample, format: OutputFormat) -> Result<()> {
        let device = NdArrayDevice::default();
        let predictor = InferencePredictor::load(config, device)?;

        let prediction = predictor.predict(&sample)?;

        match format {
            OutputFormat::Table => {
                print!("{}", format_prediction(&prediction));
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "score": prediction.score,
                    "category": prediction.category.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
        }

        Ok(())
    }

    pub fn attributes() -> Result<()> {
        println!(
            "{:<22} {:>8} {:>8} {:>8}  transform",
            "attribute", "min", "max", "default"
        );
        println!("{}", "─".repeat(62));
        for attr in Attribute::ALL {
            let (min, max) = attr.range();
            let transform = if attr.log_transformed() {
                "ln(x + 1)"
            } else {
                "identity"
            };
            println!(
                "{:<22} {:>8} {:>8} {:>8}  {}",
                attr.name(),
                min,
                max,
                attr.default_value(),
                transform
            );
        }
        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let model_file = format!("{}.mpk", config.artifacts.model_path);

        println!("Artifact Information");
        println!("───────────────────────────────");
        println!("  Scaler:      {}", config.artifacts.scaler_path);
        println!(
            "  Model:       {} (exists: {})",
            model_file,
            std::path::Path::new(&model_file).exists()
        );
        println!("  Hidden dims: {:?}", config.model.hidden_dims);
        println!(
            "  Thresholds:  excellent >= {}, average >= {}",
            config.thresholds.excellent, config.thresholds.average
        );

        Ok(())
    }

    pub fn model_validate(config: &Config) -> Result<()> {
        let device = NdArrayDevice::default();
        let _predictor = InferencePredictor::load(config, device)?;
        println!("Both artifacts loaded successfully");
        Ok(())
    }
}
