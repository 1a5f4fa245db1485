//! The static station directory and spoken-name normalization.

mod dataset;
mod directory;
mod essentialize;
mod matcher;

pub use dataset::{Dataset, DatasetError, StationEntry, parse_dataset, read_dataset};
pub use directory::{StationDirectory, StationRecord};
pub use essentialize::essentialize;
pub use matcher::{ExactMatcher, NameMatcher, SubstringMatcher};
