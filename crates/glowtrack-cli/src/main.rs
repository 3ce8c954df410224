//! glowtrack CLI: before/after photo comparison and report governance.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use glowtrack::{AnalysisDocument, AssessConfig, OutcomeAssessor, TreatmentContext};
use serde::Serialize;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "glowtrack")]
#[command(
    about = "Quantify before/after photo changes and decide who may see the report"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an aligned before/after photo pair with classical metrics.
    Compare(CliCompareArgs),

    /// Govern an existing analysis document (JSON or raw provider reply).
    Evaluate(CliEvaluateArgs),

    /// Compare a photo pair and govern the result in one step.
    Assess(CliAssessArgs),

    /// Print the effective configuration.
    ConfigInfo {
        /// Optional configuration file (JSON) to validate and print.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct CliImagePairArgs {
    /// Path to the before photo.
    #[arg(long)]
    before: PathBuf,

    /// Path to the after photo (same framing and size as before).
    #[arg(long)]
    after: PathBuf,

    /// Write a side-by-side before|after PNG here.
    #[arg(long)]
    composite: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliTreatmentArgs {
    /// Treatment date (YYYY-MM-DD).
    #[arg(long)]
    treatment_date: NaiveDate,

    /// Photo capture date (YYYY-MM-DD).
    #[arg(long)]
    photo_date: NaiveDate,

    /// Treatment label, used in messages and for threshold profile lookup.
    #[arg(long, default_value = "treatment")]
    treatment: String,
}

impl CliTreatmentArgs {
    fn to_context(&self) -> TreatmentContext {
        TreatmentContext::new(self.treatment_date, self.photo_date, self.treatment.clone())
    }
}

#[derive(Debug, Clone, Args)]
struct CliCompareArgs {
    #[command(flatten)]
    images: CliImagePairArgs,

    /// Path to write the comparison report (JSON). Printed to stdout if omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliEvaluateArgs {
    /// Path to the analysis document.
    #[arg(long)]
    analysis: PathBuf,

    /// Treat the analysis file as a raw provider reply and extract its JSON.
    #[arg(long)]
    provider_response: bool,

    #[command(flatten)]
    treatment: CliTreatmentArgs,

    /// Path to write the evaluation (JSON). Printed to stdout if omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliAssessArgs {
    #[command(flatten)]
    images: CliImagePairArgs,

    #[command(flatten)]
    treatment: CliTreatmentArgs,

    /// Path to write the assessment (JSON). Printed to stdout if omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => run_compare(&args),
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Assess(args) => run_assess(&args),
        Commands::ConfigInfo { config } => run_config_info(config.as_deref()),
    }
}

// ── shared helpers ─────────────────────────────────────────────────────

fn load_assessor(config: Option<&Path>) -> CliResult<OutcomeAssessor> {
    match config {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            OutcomeAssessor::from_config_file(path)
        }
        None => Ok(OutcomeAssessor::new()),
    }
}

fn load_rgb(path: &Path) -> CliResult<image::RgbImage> {
    let img = image::open(path).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", path.display(), e).into()
    })?;
    let rgb = img.to_rgb8();
    tracing::info!(
        "Loaded {} ({}x{})",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    Ok(rgb)
}

fn load_pair(args: &CliImagePairArgs) -> CliResult<(image::RgbImage, image::RgbImage)> {
    let before = load_rgb(&args.before)?;
    let after = load_rgb(&args.after)?;

    if let Some(path) = &args.composite {
        let composite = glowtrack::side_by_side(&before, &after)?;
        composite.save(path)?;
        tracing::info!("Composite written to {}", path.display());
    }

    Ok((before, after))
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Results written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// ── compare ────────────────────────────────────────────────────────────

fn run_compare(args: &CliCompareArgs) -> CliResult<()> {
    let assessor = load_assessor(args.config.as_deref())?;
    let (before, after) = load_pair(&args.images)?;

    let report = assessor.compare(&before, &after);
    tracing::info!(
        "Overall score {:.1}/10 ({} of 4 dimensions measured)",
        report.overall_score,
        report.n_measured()
    );

    emit(&report, args.out.as_deref())
}

// ── evaluate ───────────────────────────────────────────────────────────

fn run_evaluate(args: &CliEvaluateArgs) -> CliResult<()> {
    let assessor = load_assessor(args.config.as_deref())?;

    let text = std::fs::read_to_string(&args.analysis).map_err(|e| -> CliError {
        format!("Failed to read analysis {}: {}", args.analysis.display(), e).into()
    })?;
    let doc = if args.provider_response {
        AnalysisDocument::from_provider_response(&text)
    } else {
        AnalysisDocument::from_json_str(&text)?
    };
    tracing::info!(
        "Analysis document: success={}, {} metrics",
        doc.success,
        doc.n_metrics()
    );

    let evaluation = assessor.evaluate(&doc, &args.treatment.to_context())?;
    tracing::info!(
        "Effect {} → visibility {}",
        evaluation.effect_level,
        evaluation.visibility.code()
    );

    emit(&evaluation, args.out.as_deref())
}

// ── assess ─────────────────────────────────────────────────────────────

fn run_assess(args: &CliAssessArgs) -> CliResult<()> {
    let assessor = load_assessor(args.config.as_deref())?;
    let (before, after) = load_pair(&args.images)?;

    let assessment = assessor.assess(&before, &after, &args.treatment.to_context())?;
    tracing::info!(
        "Overall score {:.1}/10, effect {} → visibility {}",
        assessment.comparison.overall_score,
        assessment.evaluation.effect_level,
        assessment.evaluation.visibility.code()
    );

    emit(&assessment, args.out.as_deref())
}

// ── config-info ────────────────────────────────────────────────────────

fn run_config_info(config: Option<&Path>) -> CliResult<()> {
    let config = match config {
        Some(path) => AssessConfig::from_json_file(path)?,
        None => AssessConfig::default(),
    };

    let metrics = &config.metrics;
    let default = &config.profiles.default;
    println!("glowtrack configuration");
    println!(
        "  canny thresholds:     {} / {}",
        metrics.canny_low, metrics.canny_high
    );
    println!(
        "  wrinkle bands:        forehead {:?}, eyes {:?}, mouth {:?}",
        metrics.wrinkle_bands.forehead, metrics.wrinkle_bands.eyes, metrics.wrinkle_bands.mouth
    );
    println!(
        "  effect tiers (%):     poor {} / fair {} / good {} / excellent {}",
        default.effect.poor, default.effect.fair, default.effect.good, default.effect.excellent
    );
    println!(
        "  timing (days):        early <{} / optimal {}..={} / late >{}",
        default.timing.too_early_days,
        default.timing.optimal_min_days,
        default.timing.optimal_max_days,
        default.timing.too_late_days
    );
    println!(
        "  risk triggers:        symmetry <{}% / naturalness <{} / metric <{}%",
        default.risk.symmetry_regression_pct,
        default.risk.min_naturalness,
        default.risk.negative_improvement_pct
    );
    if !config.profiles.treatments.is_empty() {
        let names: Vec<&str> = config.profiles.treatments.keys().map(String::as_str).collect();
        println!("  treatment profiles:   {}", names.join(", "));
    }

    Ok(())
}
