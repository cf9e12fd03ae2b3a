use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gbwt2gfa::convert::{convert_with, ConvertConfig, Progress};
use gbwt2gfa::parser::ParserTolerance;

#[derive(Parser)]
#[command(name = "gbwt2gfa")]
#[command(about = "Convert GBWT node/edge, path, and sequence dumps to GFA", long_about = None)]
#[command(version)]
struct Cli {
    /// Graph file with V, E, and e records
    #[arg(value_name = "GBWT_FILE")]
    gbwt_file: PathBuf,

    /// Path file with P, z, and o records
    #[arg(value_name = "PATH_FILE")]
    path_file: PathBuf,

    /// Sequences keyed by integer node labels
    #[arg(value_name = "FASTA_FILE")]
    fasta_file: PathBuf,

    /// GFA file to create
    #[arg(value_name = "OUTPUT_GFA")]
    output_gfa: PathBuf,

    /// How to treat suspicious input: ignore-all, safe, or pedantic
    #[arg(short = 't', long, value_name = "LEVEL", default_value = "safe")]
    tolerance: ParserTolerance,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = ConvertConfig::new(
        cli.gbwt_file,
        cli.path_file,
        cli.fasta_file,
        cli.output_gfa,
    )
    .with_tolerance(cli.tolerance);

    let mut last = None;
    let result = convert_with(&config, |step| {
        last = Some(step);
        match step {
            Progress::SequencesLoaded { submer_size, .. } => {
                println!("parsed seq");
                println!("submer_size {}", submer_size);
            }
            Progress::GraphParsed { .. } => println!("parsed gbwt"),
            Progress::PathsParsed { .. } => println!("parsed paths"),
            Progress::Written => {
                println!("GFA file written to {}", config.output.display())
            }
        }
    });
    result.with_context(|| format!("failed {}", config.next_stage(last)))?;

    Ok(())
}
