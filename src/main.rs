//! CLI for hiding a file inside a PDF and extracting it again.

use clap::{Parser, Subcommand};
use pdfstego::{PayloadCodec, StegoConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod util;

use util::format_bytes;

#[derive(Parser)]
#[command(
    name = "pdfstego",
    version,
    about = "Hide and extract files in PDF documents",
    after_help = "Supported file formats: .txt, .jpg, .png, .pdf, .docx, .exe"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Hide a file inside a PDF
    Hide {
        /// Cover PDF file
        pdf: PathBuf,
        /// File to hide
        file: PathBuf,
        /// Output PDF file with hidden data
        output: PathBuf,
        /// Refuse payloads larger than this many bytes
        #[arg(long)]
        max_size: Option<usize>,
    },

    /// Extract the hidden file from a PDF
    Extract {
        /// PDF file with hidden data
        pdf: PathBuf,
        /// Output directory for the extracted file
        output: PathBuf,
    },

    /// Check whether a PDF contains hidden data
    Check {
        /// PDF file to check
        pdf: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match cli.command {
        Command::Hide {
            pdf,
            file,
            output,
            max_size,
        } => hide(pdf, file, output, max_size),
        Command::Extract { pdf, output } => extract(pdf, output),
        Command::Check { pdf } => check(pdf),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("PDF STEGANOGRAPHY - {title}");
    println!("{}", "=".repeat(60));
}

fn finish(ok: bool) -> bool {
    println!("{}", "=".repeat(60));
    if ok {
        println!("✓ OPERATION COMPLETED SUCCESSFULLY");
    } else {
        println!("✗ OPERATION FAILED");
    }
    println!("{}", "=".repeat(60));
    ok
}

fn hide(pdf: PathBuf, file: PathBuf, output: PathBuf, max_size: Option<usize>) -> bool {
    banner("HIDE FILE");
    println!("Cover PDF: {}", pdf.display());
    println!("File to hide: {}", file.display());
    println!("Output PDF: {}", output.display());
    println!("{}", "-".repeat(60));

    let codec = PayloadCodec::with_config(StegoConfig {
        max_payload_size: max_size,
        ..Default::default()
    });

    match codec.embed(&pdf, &file, &output) {
        Ok(report) => {
            println!(
                "✓ Successfully hidden '{}' ({}) in PDF",
                report.filename,
                format_bytes(report.payload_size)
            );
            println!(
                "✓ Output saved to: {} ({})",
                report.output.display(),
                format_bytes(report.output_size)
            );
            finish(true)
        }
        Err(e) => {
            println!("✗ Error hiding file: {e}");
            finish(false)
        }
    }
}

fn extract(pdf: PathBuf, output: PathBuf) -> bool {
    banner("EXTRACT FILE");
    println!("Source PDF: {}", pdf.display());
    println!("Output directory: {}", output.display());
    println!("{}", "-".repeat(60));

    let codec = PayloadCodec::new();

    if !codec.detect(&pdf) {
        println!("✗ No hidden data found in this PDF");
        println!("{}", "=".repeat(60));
        return false;
    }

    let info = codec.describe(&pdf);
    if let Some(info) = &info {
        println!(
            "Hidden file detected: {} ({})",
            info.filename,
            format_bytes(info.size as usize)
        );
        println!("{}", "-".repeat(60));
    }

    match codec.extract(&pdf, &output) {
        Ok(path) => {
            let (name, size) = match info {
                Some(info) => (info.filename, info.size as usize),
                None => (
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    std::fs::metadata(&path).map(|m| m.len() as usize).unwrap_or(0),
                ),
            };
            println!("{}", extracted_message(&name, size));
            println!("✓ Saved to: {}", path.display());
            finish(true)
        }
        Err(e) => {
            println!("✗ Error extracting file: {e}");
            finish(false)
        }
    }
}

fn check(pdf: PathBuf) -> bool {
    banner("CHECK FILE");
    println!("Checking: {}", pdf.display());
    println!("{}", "-".repeat(60));

    let codec = PayloadCodec::new();

    // An unreadable or non-PDF carrier reads as "no hidden data"; the reason
    // is logged at debug level.
    if codec.detect(&pdf) {
        match codec.describe(&pdf) {
            Some(info) => {
                println!("✓ Hidden data FOUND");
                println!("  Filename: {}", info.filename);
                println!("  Size: {}", format_bytes(info.size as usize));
            }
            None => println!("✓ Hidden data markers found but unable to read info"),
        }
    } else {
        println!("✗ No hidden data found");
    }

    println!("{}", "=".repeat(60));
    true
}

fn extracted_message(name: &str, size: usize) -> String {
    format!("✓ Successfully extracted '{name}' ({size} bytes)")
}
