use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quiz_dedup::{
    deduplicate, find_near_duplicate, load_candidates, write_consolidated, DirProvider,
    NearDuplicate,
};

use crate::DedupArgs;

pub fn dedup(data_path: PathBuf, args: &DedupArgs) -> Result<()> {
    let candidates = load_candidates(&DirProvider::new(data_path))?;
    let outcome = deduplicate(candidates)?;

    for duplicate in &outcome.duplicates {
        println!("Duplicate question found: {}", duplicate.question);
        println!("Location 1: {}", duplicate.original);
        println!("Location 2: {}\n", duplicate.duplicate);
    }

    println!("Total duplicates: {}", outcome.duplicate_count());
    println!("Total questions: {}", outcome.total);
    println!("Unique questions: {}", outcome.unique_count());

    for (first, second, uuid) in outcome.uuid_collisions() {
        tracing::warn!("uuid {uuid} is shared by {first} and {second}");
    }

    if args.near_duplicates {
        if let Some(pair) = find_near_duplicate(&outcome.unique, args.similarity_threshold)? {
            print_near_duplicate(&pair);
            tracing::warn!("stopping before {} is written", args.output_file.display());

            return Ok(());
        }
    }

    let (directory, file_name) = split_output_file(&args.output_file)?;
    write_consolidated(&outcome, &DirProvider::new(directory), file_name)
}

fn print_near_duplicate(pair: &NearDuplicate) {
    println!(
        "Similar questions found:\n{}\n{}",
        pair.first.question, pair.second.question
    );
    println!("{}", pair.similarity);
    println!("{}", pair.first.answers);
    println!("{}", pair.second.answers);
    println!("Location 1: {}", pair.first.location);
    println!("Location 2: {}", pair.second.location);
}

fn split_output_file(output_file: &Path) -> Result<(&Path, &str)> {
    let file_name = output_file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid output file {}", output_file.display()))?;
    let directory = output_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    Ok((directory, file_name))
}
