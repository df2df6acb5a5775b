//! gls-sd-conv: convert dictionaries between GLS text and StarDict.
//!
//! ```text
//! gls-sd-conv dictionary.gls    # -> dictionary.ifo, .idx.gz, .dict(.dz), .syn
//! gls-sd-conv dictionary.ifo    # -> dictionary.gls
//! ```

use clap::Parser;
use gls_stardict::{convert, ConvertOptions, Direction, DEFAULT_PACKER};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gls-sd-conv")]
#[command(version)]
#[command(about = "Convert dictionaries between GLS text and StarDict", long_about = None)]
struct Cli {
    /// Input dictionary: a .gls file or a StarDict .ifo file
    input: PathBuf,

    /// Output path (GLS file, or the stem of the StarDict files)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not pack the .dict file after writing StarDict
    #[arg(long)]
    no_pack: bool,

    /// Program used to pack the .dict file
    #[arg(long, default_value = DEFAULT_PACKER)]
    packer: String,

    /// Keep the uncompressed .idx next to .idx.gz
    #[arg(long)]
    keep_idx: bool,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Reject the extension before anything is read
    if let Err(e) = Direction::from_path(&cli.input) {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("Usage 1: gls-sd-conv dictionary.gls");
        eprintln!("Usage 2: gls-sd-conv dictionary.ifo");
        std::process::exit(1);
    }

    let options = ConvertOptions {
        pack_dict: !cli.no_pack,
        packer: cli.packer,
        keep_uncompressed_index: cli.keep_idx,
        output: cli.output,
    };

    match convert(&cli.input, &options) {
        // A failed packing step has been logged and does not change the exit code
        Ok(report) => {
            for path in &report.written {
                log::debug!("Wrote {:?}", path);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
