//! svg-export - turn the paths of an SVG into a vertex-set JSON asset
//!
//! Usage: `svg-export <SOURCE> <NAME>` where SOURCE is an http(s) URL, a
//! `file://` URL or a local path.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snowglobe::export::{export_svg, SvgSource};
use snowglobe_core::DEFAULT_SAMPLE_LENGTH;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(help = "SVG to convert: http(s) URL, file:// URL or local path.")]
    source: String,
    #[arg(help = "Name of the JSON file to write (.json is added when missing).")]
    name: PathBuf,
    #[arg(long, default_value_t = DEFAULT_SAMPLE_LENGTH, help = "Distance between samples along curves.")]
    sample_length: f32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match export_svg(&SvgSource::parse(&cli.source), &cli.name, cli.sample_length) {
        Ok(summary) => {
            println!(
                "Wrote {} vertex sets to {}",
                summary.set_count,
                summary.path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("svg-export: {}", e);
            ExitCode::FAILURE
        }
    }
}
