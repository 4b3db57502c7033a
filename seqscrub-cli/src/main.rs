use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod input;

use config::Config;

#[derive(Parser)]
#[command(name = "seqscrub")]
#[command(about = "seqscrub - FASTA/FASTQ validation and cleanup")]
#[command(version)]
#[command(long_about = "
seqscrub validates FASTA/FASTQ sequence files, optionally sanitizes them,
and reports dataset statistics. The input format is detected from content,
and gzipped inputs are decoded transparently.

Examples:
  seqscrub check --input reads.fastq --min-length 30
  seqscrub clean --input contigs.fa --out contigs.clean.fa
  seqscrub report --input reads.fq.gz --out report.json
  seqscrub report --input contigs.fa --out report.csv --sanitize
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (defaults to ./seqscrub.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate sequences and print a summary
    Check {
        /// Input FASTA/FASTQ file (plain or .gz)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Minimum sequence length (overrides configuration)
        #[arg(short, long)]
        min_length: Option<usize>,

        /// Sanitize before scoring length/complexity rules
        #[arg(short, long)]
        sanitize: bool,

        /// How many invalid records to list (0 disables the listing)
        #[arg(long, default_value = "10")]
        show_invalid: usize,
    },

    /// Sanitize sequences and write cleaned FASTA
    Clean {
        /// Input FASTA/FASTQ file (plain or .gz)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Output FASTA file
        #[arg(short, long, required = true)]
        out: PathBuf,

        /// Write every record, not only those the sanitizer changed
        #[arg(long)]
        all: bool,

        /// Minimum sequence length (overrides configuration)
        #[arg(short, long)]
        min_length: Option<usize>,
    },

    /// Write a JSON or CSV report file
    Report {
        /// Input FASTA/FASTQ file (plain or .gz)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Output report file (.json or .csv)
        #[arg(short, long, required = true)]
        out: PathBuf,

        /// Report format (auto-detected from extension if omitted)
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Sanitize before scoring length/complexity rules
        #[arg(short, long)]
        sanitize: bool,

        /// Minimum sequence length (overrides configuration)
        #[arg(short, long)]
        min_length: Option<usize>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            input,
            min_length,
            sanitize,
            show_invalid,
        } => commands::check::execute(&config, input, min_length, sanitize, show_invalid),
        Commands::Clean {
            input,
            out,
            all,
            min_length,
        } => commands::clean::execute(&config, input, out, all, min_length),
        Commands::Report {
            input,
            out,
            format,
            sanitize,
            min_length,
        } => commands::report::execute(&config, input, out, format, sanitize, min_length),
    }
}
