pub mod dictionary;
pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod wordlist;

pub use dictionary::{
    write_matches, DictionaryLine, DictionaryScanner, LineClass, MalformedLog, ScanReport,
};
pub use extract::{accumulate, extract_file, read_source, CharCounts, Extraction, SortOrder};
pub use filter::{filter_chinese, is_kept, INTERPUNCT};
pub use pipeline::{run, Options, RunReport, Status, Step, StepOutcome};
pub use wordlist::{read_highlighted, read_highlighted_path, write_counts, write_counts_to_path};
