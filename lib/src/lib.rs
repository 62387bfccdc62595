//! Normalization and deduplication of multiple-choice quiz question files.
//!
//! Raw files are stamped with their provenance by [`normalize`], given stable
//! ids by [`backfill_uuids`] and merged into one duplicate-free collection by
//! [`deduplicate`].

mod backfill;
mod data;
mod dedup;
mod error;
mod filename;
mod normalize;
mod progress;
mod provider;
mod raw_data;
mod similarity;

pub use backfill::backfill_uuids;
pub use data::{to_json_pretty, QuizFile};
pub use dedup::{
    deduplicate, load_candidates, write_consolidated, DedupOutcome, DuplicateReport,
};
pub use error::DataError;
pub use filename::{is_question_file, part, SourcePolicy};
pub use normalize::{normalize, stamp, NormalizedFile};
pub use progress::ProgressData;
pub use provider::{DirProvider, FileProvider, MemoryProvider};
pub use raw_data::{Location, QuestionKey, RawQuestionData};
pub use similarity::{
    find_near_duplicate, ratio, NearDuplicate, NearDuplicateSide, DEFAULT_THRESHOLD,
};
