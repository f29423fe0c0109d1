//! Write the OpenAPI document as JSON to stdout or a file.

use std::io::Write;
use std::path::PathBuf;

use backend::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Export the backend's OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about)]
struct Cli {
    /// Destination file; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    match cli.output {
        Some(path) => std::fs::write(path, format!("{json}\n")),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")
        }
    }
}
