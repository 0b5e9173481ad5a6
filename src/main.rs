use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_quant::DitherMethod;
use pixelsmith::models::{ProcessSettings, Request, WorkerConfig};
use pixelsmith::rendering::{decode_png, encode_png};
use pixelsmith::services::{handle_request, run_process, run_suggest, serve_lines, WorkerHandle};

#[derive(Parser)]
#[command(name = "pixelsmith")]
#[command(about = "Pixel-art quantization and dithering worker")]
struct Cli {
    /// YAML configuration file (falls back to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve newline-delimited JSON requests on stdin, responses on stdout
    Worker,
    /// Answer a single JSON request
    Process {
        /// Request file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        request: String,
    },
    /// Run the pipeline over a PNG file
    Render {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Target width (default: source width)
        #[arg(long)]
        width: Option<u32>,

        /// Target height (default: source height)
        #[arg(long)]
        height: Option<u32>,

        /// Resampling method: nearest, bilinear or lanczos
        #[arg(long, default_value = "nearest")]
        resample: String,

        /// Dither method, e.g. "floyd-steinberg" or "bayer-4x4"
        #[arg(long, default_value = "none")]
        dither: String,

        /// Dither strength, 0 to 100
        #[arg(long, default_value_t = 100.0)]
        strength: f64,

        /// Palette as comma-separated hex colors (e.g. "#000000,#ffffff")
        #[arg(long)]
        palette: Option<String>,

        /// Derive the palette with k-means using this many colors
        #[arg(long)]
        kmeans: Option<usize>,

        /// Brightness offset, -100 to 100
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        brightness: f64,

        /// Contrast, -100 to 100
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        contrast: f64,

        /// Saturation, -100 to 100
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        saturation: f64,
    },
    /// Suggest colors that would improve a palette for a PNG file
    Suggest {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Existing palette as comma-separated hex colors
        #[arg(long)]
        palette: String,

        /// Number of suggestions
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    let Some(command) = cli.command else {
        run_status_command(config_path.as_deref());
        return Ok(());
    };

    init_tracing();
    let config = WorkerConfig::load(config_path.as_deref());

    match command {
        Commands::Worker => run_worker_command(config).await,
        Commands::Process { request } => run_process_command(&request, &config),
        Commands::Render {
            input,
            output,
            width,
            height,
            resample,
            dither,
            strength,
            palette,
            kmeans,
            brightness,
            contrast,
            saturation,
        } => {
            let settings = ProcessSettings {
                target_width: width,
                target_height: height,
                resampling_method: resample,
                dither_method: dither,
                dither_strength: strength,
                palette: palette.as_deref().map(split_palette).unwrap_or_default(),
                use_kmeans: kmeans.is_some(),
                kmeans_colors: kmeans.unwrap_or(0),
                brightness,
                contrast,
                saturation,
            };
            run_render_command(&input, &output, &settings, &config)
        }
        Commands::Suggest {
            input,
            palette,
            count,
        } => run_suggest_command(&input, &split_palette(&palette), count, &config),
    }
}

/// Logs go to stderr so stdout carries only protocol output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsmith=info,pixel_quant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn split_palette(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

async fn run_worker_command(config: WorkerConfig) -> anyhow::Result<()> {
    let (handle, task) = WorkerHandle::spawn(config);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let served = serve_lines(&handle, stdin, tokio::io::stdout()).await?;
    tracing::info!(served, "Input closed");

    drop(handle);
    task.await.context("worker task failed")?;
    Ok(())
}

fn run_process_command(source: &str, config: &WorkerConfig) -> anyhow::Result<()> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };

    let request: Request = serde_json::from_str(&text).context("malformed request")?;
    let response = handle_request(request, config, &mut config.rng());
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn run_render_command(
    input: &Path,
    output: &Path,
    settings: &ProcessSettings,
    config: &WorkerConfig,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let src = decode_png(&bytes, config.max_pixels)?;

    let start = std::time::Instant::now();
    let out = run_process(&src, settings, config, &mut config.rng())?;
    let png = encode_png(&out)?;
    std::fs::write(output, &png)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = out.width(),
        height = out.height(),
        bytes = png.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered"
    );
    Ok(())
}

fn run_suggest_command(
    input: &Path,
    palette: &[String],
    count: usize,
    config: &WorkerConfig,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let src = decode_png(&bytes, config.max_pixels)?;

    let colors = run_suggest(&src, palette, count, config, &mut config.rng())?;
    if colors.is_empty() {
        tracing::info!("No suggestions: palette is empty or the image is transparent");
    }
    for color in colors {
        println!("{}", color.to_hex());
    }
    Ok(())
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("pixelsmith v{VERSION}");
    println!("Pixel-art quantization and dithering worker\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        std::env::var("CONFIG_FILE")
            .ok()
            .as_deref()
            .unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("pixelsmith=info,pixel_quant=info (default)")
    );

    println!("\nConfiguration:");
    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (file not found, using defaults)", path.display()),
        None => "defaults".to_string(),
    };
    println!("  Source:      {source}");
    let config = WorkerConfig::load(config_path);
    println!(
        "  Seed:        {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    );
    println!("  Queue depth: {}", config.queue_depth);
    println!("  Max pixels:  {}", config.max_pixels);

    println!("\nDither Methods:");
    let names: Vec<&str> = DitherMethod::ALL.iter().map(|m| m.as_str()).collect();
    for chunk in names.chunks(5) {
        println!("  {}", chunk.join(", "));
    }

    println!("\nCommands:");
    println!("  pixelsmith worker     Serve JSON requests on stdin/stdout");
    println!("  pixelsmith process    Answer one JSON request");
    println!("  pixelsmith render     Run the pipeline over a PNG file");
    println!("  pixelsmith suggest    Suggest palette colors for a PNG file");
    println!("  pixelsmith --help     Show all options");
}
