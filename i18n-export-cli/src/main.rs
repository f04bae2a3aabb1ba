mod stats;
mod view;

use std::{path::PathBuf, process};

use clap::Parser;
use i18n_export::{ExportConfig, Language, export};
use tracing_subscriber::EnvFilter;

use crate::{stats::print_stats, view::print_view};

/// Writes the consolidated i18n document from the decompiled Android resources.
///
/// Run without arguments from the directory holding `decompiled/`; the
/// document lands in `docs/i18n.json`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the resource paths and the default output are relative to
    #[arg(long)]
    root: Option<PathBuf>,

    /// Write the document here instead of `docs/i18n.json`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print how each language's table was assembled
    #[arg(long)]
    stats: bool,

    /// Print the final strings of one language after writing
    #[arg(long, value_name = "LANG")]
    show: Option<Language>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ExportConfig::default();
    if let Some(root) = &args.root {
        config = config.with_root(root);
    }
    if let Some(output) = args.output {
        config = config.with_output(output);
    }

    let report = match export(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("Wrote {}", report.output.display());

    if args.stats {
        print_stats(&report);
    }
    if let Some(lang) = args.show {
        print_view(&report.document, lang);
    }
}
