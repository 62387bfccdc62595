use anyhow::Result;
use quiz_dedup::{DirProvider, SourcePolicy};

use crate::NormalizeArgs;

pub fn normalize(args: &NormalizeArgs) -> Result<()> {
    let input = DirProvider::new(&args.input_path);
    let output = DirProvider::create(&args.output_path)?;

    for file in quiz_dedup::normalize(&input, &output, SourcePolicy::from(args.source_policy))? {
        println!("{} {}", file.name, file.part);
    }

    Ok(())
}
