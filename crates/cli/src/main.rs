use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use aurafit_core::detection::infrastructure::heuristic_landmarker::HeuristicLandmarker;
use aurafit_core::pipeline::analyze_image_use_case::AnalyzeImageUseCase;
use aurafit_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use aurafit_core::pipeline::scan_result::ScanResult;
use aurafit_core::pipeline::scan_sequence_use_case::ScanSequenceUseCase;
use aurafit_core::pipeline::scan_session::ScanSession;
use aurafit_core::shared::config::ScanConfig;
use aurafit_core::shared::constants::IMAGE_EXTENSIONS;
use aurafit_core::shared::context::AnalysisContext;
use aurafit_core::video::domain::image_writer::ImageWriter;
use aurafit_core::video::infrastructure::image_file_reader::ImageFileReader;
use aurafit_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Face shape and skin tone analysis for images.
#[derive(Parser)]
#[command(name = "aurafit-scan")]
struct Cli {
    /// Input image, or several images scanned as consecutive frames.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON scan configuration (missing fields use defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample every Nth pixel on both axes when locating the face.
    #[arg(long)]
    stride: Option<u32>,

    /// Consecutive frames without a face before the scan gives up.
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Write the input annotated with measurement key points (single image only).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Print the result as JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let context = AnalysisContext::new(build_config(&cli)?)?;

    let result = if let [input] = cli.inputs.as_slice() {
        run_single(&context, input, cli.overlay.as_deref())?
    } else {
        run_sequence(&context, &cli.inputs)?
    };

    print_result(&result, cli.json)?;
    Ok(())
}

fn run_single(
    context: &AnalysisContext,
    input: &Path,
    overlay: Option<&Path>,
) -> Result<ScanResult, Box<dyn std::error::Error>> {
    let overlay_writer: Option<Box<dyn ImageWriter>> = overlay
        .is_some()
        .then(|| Box::new(ImageFileWriter::new()) as Box<dyn ImageWriter>);

    let mut use_case = AnalyzeImageUseCase::new(
        context,
        Box::new(ImageFileReader::new()),
        Box::new(HeuristicLandmarker::new(context)),
        overlay_writer,
    );
    let result = use_case.execute(input, overlay)?;
    log::info!("Analyzed {}", input.display());
    Ok(result)
}

fn run_sequence(
    context: &AnalysisContext,
    inputs: &[PathBuf],
) -> Result<ScanResult, Box<dyn std::error::Error>> {
    let session = ScanSession::new(
        context.clone(),
        Box::new(HeuristicLandmarker::new(context)),
        Box::new(StdoutPipelineLogger::default()),
    );
    let mut use_case = ScanSequenceUseCase::new(Box::new(ImageFileReader::new()), session);
    let result = use_case.execute(inputs)?;
    Ok(result)
}

fn print_result(result: &ScanResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.summary());
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    if let Some(stride) = cli.stride {
        config.sample_stride = stride;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!(
                "Unsupported input '{}', expected one of: {}",
                input.display(),
                IMAGE_EXTENSIONS.join(", ")
            )
            .into());
        }
    }
    if cli.overlay.is_some() && cli.inputs.len() > 1 {
        return Err("--overlay is only supported for a single input image".into());
    }
    if let Some(overlay) = &cli.overlay {
        if !is_image(overlay) {
            return Err(format!(
                "Overlay must be an image file, got '{}'",
                overlay.display()
            )
            .into());
        }
    }
    if cli.stride == Some(0) {
        return Err("Stride must be at least 1".into());
    }
    if cli.max_attempts == Some(0) {
        return Err("Max attempts must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
