use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use quiz_dedup::SourcePolicy;

mod backfill;
mod dedup;
mod normalize;
mod progress;

#[derive(Parser)]
#[clap(version, about = "Normalize and deduplicate quiz question files")]
struct QuizDedup {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stamp source, part and question number on every raw question.
    Normalize {
        #[clap(flatten)]
        normalize: NormalizeArgs,
    },
    /// Give every raw question without a uuid a new one, in place.
    Backfill {
        #[clap(
            short,
            long,
            value_parser,
            value_name = "PATH",
            env = "QUIZ_RAW_PATH",
            default_value = "json"
        )]
        data_path: PathBuf,
    },
    /// Merge normalized files into one file without exact duplicates.
    Dedup {
        #[clap(
            short,
            long,
            value_parser,
            value_name = "PATH",
            env = "QUIZ_NORMALIZED_PATH",
            default_value = "jsonnew"
        )]
        data_path: PathBuf,

        #[clap(flatten)]
        dedup: DedupArgs,
    },
    /// Normalize, then deduplicate the normalized files.
    Run {
        #[clap(flatten)]
        normalize: NormalizeArgs,

        #[clap(flatten)]
        dedup: DedupArgs,
    },
    /// Check a quiz progress file for uuids answered more than once.
    CheckProgress {
        #[clap(short, long, value_parser, value_name = "PATH")]
        progress_file: PathBuf,
    },
}

#[derive(clap::Args)]
pub struct NormalizeArgs {
    #[clap(
        short,
        long,
        value_parser,
        value_name = "PATH",
        env = "QUIZ_RAW_PATH",
        default_value = "json"
    )]
    pub input_path: PathBuf,

    #[clap(
        short,
        long,
        value_parser,
        value_name = "PATH",
        env = "QUIZ_NORMALIZED_PATH",
        default_value = "jsonnew"
    )]
    pub output_path: PathBuf,

    #[clap(long, value_enum, default_value = "classify")]
    pub source_policy: SourcePolicyArg,
}

#[derive(clap::Args)]
pub struct DedupArgs {
    #[clap(
        short = 'f',
        long,
        value_parser,
        value_name = "FILE",
        env = "QUIZ_OUTPUT_FILE",
        default_value = "all.json"
    )]
    pub output_file: PathBuf,

    /// Also look for nearly identical questions and stop at the first pair.
    #[clap(long, action)]
    pub near_duplicates: bool,

    #[clap(long, value_parser, default_value_t = quiz_dedup::DEFAULT_THRESHOLD)]
    pub similarity_threshold: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SourcePolicyArg {
    /// Tag `_part` files as awslagi and `examtopics` files as examtopics.
    Classify,
    /// Use the file name up to the first dash.
    Prefix,
}

impl From<SourcePolicyArg> for SourcePolicy {
    fn from(arg: SourcePolicyArg) -> Self {
        match arg {
            SourcePolicyArg::Classify => SourcePolicy::Classify,
            SourcePolicyArg::Prefix => SourcePolicy::Prefix,
        }
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "env-file")]
    dotenvy::dotenv().ok();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "quiz_dedup=info,quiz_dedup_bin=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let quiz_dedup = QuizDedup::parse();

    match quiz_dedup.command {
        Command::Normalize { normalize: args } => normalize::normalize(&args),
        Command::Backfill { data_path } => backfill::backfill(data_path),
        Command::Dedup {
            data_path,
            dedup: args,
        } => dedup::dedup(data_path, &args),
        Command::Run {
            normalize: normalize_args,
            dedup: dedup_args,
        } => {
            normalize::normalize(&normalize_args)?;
            dedup::dedup(normalize_args.output_path, &dedup_args)
        }
        Command::CheckProgress { progress_file } => progress::check_progress(progress_file),
    }
}
