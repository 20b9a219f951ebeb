//! Command-file runner for the B+ tree.
//!
//! Reads `Initialize/Insert/Delete/Search` commands from an input file and
//! writes one line per search to the output file.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use bplustree::driver::Driver;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bplustree",
    version,
    about = "Run B+ tree commands from a file and write search results"
)]
struct Cli {
    /// Command file, one `Command(args)` per line.
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// File receiving one line per search.
    #[arg(short, long, default_value = "output_file.txt")]
    output: PathBuf,

    /// Print the final tree structure to stderr.
    #[arg(long)]
    dump: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bplustree=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> bplustree::Result<()> {
    let cli = Cli::parse();

    let input = BufReader::new(File::open(&cli.input)?);
    let output = BufWriter::new(File::create(&cli.output)?);

    let mut driver = Driver::new();
    let summary = driver.run(input, output)?;
    tracing::info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        commands = summary.commands,
        searches = summary.searches,
        "finished"
    );

    if cli.dump {
        if let Some(tree) = driver.tree() {
            eprint!("{}", tree.dump());
        }
    }
    Ok(())
}
