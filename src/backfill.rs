use std::path::PathBuf;

use anyhow::Result;
use quiz_dedup::{backfill_uuids, DirProvider};

pub fn backfill(data_path: PathBuf) -> Result<()> {
    let assigned = backfill_uuids(&DirProvider::new(data_path))?;

    println!("Assigned uuids: {assigned}");

    Ok(())
}
