use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use helmetwatch_client::config::{DEFAULT_BASE_URL, PROCESSED_VIDEO_FILENAME};
use helmetwatch_client::domain::backend_client::BackendClient;
use helmetwatch_client::infrastructure::http_backend_client::HttpBackendClient;

/// Talk to a HelmetWatch detection backend.
#[derive(Parser)]
#[command(name = "helmetwatch")]
struct Cli {
    /// Backend base address.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload an image and save the annotated result.
    UploadImage {
        input: PathBuf,

        /// Where to write the annotated image (default: <input stem>_annotated.png).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload a video and save the processed result.
    UploadVideo {
        input: PathBuf,

        /// Where to write the processed video.
        #[arg(long, default_value = PROCESSED_VIDEO_FILENAME)]
        output: PathBuf,
    },
    /// Start a live camera session on the backend.
    StartLive {
        /// Camera device index.
        #[arg(long, default_value = "0")]
        device: u32,
    },
    /// Stop the live camera session.
    StopLive,
    /// Delete every file the backend holds. Irreversible, no confirmation.
    DeleteAll,
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
    let client = HttpBackendClient::new(&cli.backend_url)?;

    match cli.command {
        Command::UploadImage { input, output } => {
            validate_input(&input)?;
            let bytes = client.upload_image(&input)?;
            log::info!("received {} annotated bytes", bytes.len());
            let output = output.unwrap_or_else(|| annotated_output(&input));
            fs::write(&output, bytes)?;
            println!("Annotated image written to {}", output.display());
        }
        Command::UploadVideo { input, output } => {
            validate_input(&input)?;
            let bytes = client.upload_video(&input)?;
            log::info!("received {} processed video bytes", bytes.len());
            fs::write(&output, bytes)?;
            println!("Processed video written to {}", output.display());
        }
        Command::StartLive { device } => {
            client.start_live(device)?;
            let view = client.live_view_url()?;
            println!("Live session started. View it at {view}");
        }
        Command::StopLive => {
            client.stop_live()?;
            println!("Live session stopped");
        }
        Command::DeleteAll => {
            client.delete_all()?;
            println!("All backend files deleted");
        }
    }

    Ok(())
}

fn validate_input(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Input file not found: {}", path.display()).into());
    }
    Ok(())
}

/// The backend re-encodes annotated images as PNG regardless of input format.
fn annotated_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    input.with_file_name(format!("{stem}_annotated.png"))
}
