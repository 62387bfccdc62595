use std::path::PathBuf;

use anyhow::Result;
use quiz_dedup::ProgressData;

pub fn check_progress(progress_file: PathBuf) -> Result<()> {
    let progress = ProgressData::load(&progress_file)?;
    let repeated = progress.repeated_uuids();

    if repeated.is_empty() {
        println!("No duplicates found");
    } else {
        println!("Duplicates found");

        for uuid in repeated {
            println!("{uuid}");
        }
    }

    Ok(())
}
