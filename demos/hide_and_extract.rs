//! Walks through hide → check → extract → verify on throwaway files.
//!
//! Usage:
//!   cargo run --example hide_and_extract

use pdfstego::PayloadCodec;
use std::{fs, process};

const COVER: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n";
const SECRET: &[u8] = b"The meeting moved to Thursday.\n";

fn main() {
    if let Err(e) = run() {
        eprintln!("✗ Demo failed: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempfile::tempdir()?;
    let cover = work.path().join("sample.pdf");
    let secret = work.path().join("secret.txt");
    let stego = work.path().join("demo_stego.pdf");
    let extract_dir = work.path().join("extracted");
    fs::write(&cover, COVER)?;
    fs::write(&secret, SECRET)?;

    let codec = PayloadCodec::new();

    // 1. Hide
    let report = codec.embed(&cover, &secret, &stego)?;
    println!("✓ Hidden '{}' ({} bytes)", report.filename, report.payload_size);
    println!("  Original PDF: {} bytes", COVER.len());
    println!("  Stego PDF:    {} bytes", report.output_size);
    println!(
        "  Overhead:     {} bytes",
        report.output_size - COVER.len() - report.payload_size
    );

    // 2. Check
    match codec.describe(&stego) {
        Some(info) => println!("✓ Found hidden file '{}' ({} bytes)", info.filename, info.size),
        None => return Err("no hidden data detected in the stego PDF".into()),
    }

    // 3. Extract and verify
    let path = codec.extract(&stego, &extract_dir)?;
    println!("✓ Extracted to {}", path.display());
    if fs::read(&path)? != SECRET {
        return Err("extracted file differs from the original".into());
    }
    println!("✓ File integrity verified");

    // 4. The untouched cover has nothing hidden
    if codec.detect(&cover) {
        return Err("cover PDF unexpectedly contains hidden data".into());
    }
    println!("✓ Cover PDF is clean");

    Ok(())
}
