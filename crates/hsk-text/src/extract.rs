use anyhow::{Context, Result};
use encoding_rs_io::DecodeReaderBytesBuilder;
use indexmap::IndexMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::filter::{filter_chinese, INTERPUNCT};

/// Character counts in first-appearance order.
pub type CharCounts = IndexMap<char, usize>;

/// How the full statistics table is ordered when it is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Appearance,
    Frequency,
    Alphabetic,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "appearance" | "1" => Ok(SortOrder::Appearance),
            "frequency" | "2" => Ok(SortOrder::Frequency),
            "alphabetic" | "3" => Ok(SortOrder::Alphabetic),
            other => Err(anyhow::anyhow!(
                "unknown order {:?}, expected appearance, frequency, alphabetic or 1-3",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Appearance => "appearance",
            SortOrder::Frequency => "frequency",
            SortOrder::Alphabetic => "alphabetic",
        };
        f.write_str(name)
    }
}

/// Result of one accumulation pass over a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Characters that followed an interpunct.
    pub marked: CharCounts,
    /// Every character seen, interpunct excluded.
    pub all: CharCounts,
    /// Number of counted character occurrences (not unique).
    pub total: usize,
}

impl Extraction {
    pub fn unique(&self) -> usize {
        self.all.len()
    }

    /// Returns the full table in the requested order. Counts are untouched;
    /// only the iteration order differs between modes.
    pub fn ordered(&self, order: SortOrder) -> Vec<(char, usize)> {
        let mut entries: Vec<(char, usize)> = self.all.iter().map(|(&c, &n)| (c, n)).collect();
        match order {
            SortOrder::Appearance => {}
            // sort_by is stable: ties keep first-appearance order
            SortOrder::Frequency => entries.sort_by(|a, b| b.1.cmp(&a.1)),
            SortOrder::Alphabetic => entries.sort_by_key(|&(c, _)| c),
        }
        entries
    }

    pub fn marked_entries(&self) -> Vec<(char, usize)> {
        self.marked.iter().map(|(&c, &n)| (c, n)).collect()
    }

    fn add_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return;
        }

        let filtered = filter_chinese(line);
        let mut chars = filtered.chars().peekable();

        while let Some(c) = chars.next() {
            if c == INTERPUNCT {
                match chars.peek() {
                    Some(&next) if next != INTERPUNCT => {
                        *self.marked.entry(next).or_insert(0) += 1;
                    }
                    // Trailing or doubled marker: nothing to mark.
                    _ => log::debug!("Interpunct without a follower in {:?}", line),
                }
                continue;
            }

            self.total += 1;
            *self.all.entry(c).or_insert(0) += 1;
        }
    }
}

/// Runs the extraction pass over already loaded lines.
pub fn accumulate<I, S>(lines: I) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extraction = Extraction::default();
    for line in lines {
        extraction.add_line(line.as_ref());
    }
    extraction
}

/// Loads a whole source text. A UTF-8 or UTF-16 byte order mark is honoured;
/// anything else must be valid UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut reader = DecodeReaderBytesBuilder::new()
        .bom_sniffing(true)
        .build(file);

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read {:?}", path))?;
    Ok(text)
}

pub fn extract_file(path: &Path) -> Result<Extraction> {
    let text = read_source(path)?;
    let extraction = accumulate(text.lines());
    log::info!(
        "Extracted {} characters ({} unique, {} marked) from {:?}",
        extraction.total,
        extraction.unique(),
        extraction.marked.len(),
        path
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_marker_is_skipped() {
        let mut extraction = Extraction::default();
        extraction.add_line("好·\n");
        assert!(extraction.marked.is_empty());
        assert_eq!(extraction.total, 1);
    }

    #[test]
    fn doubled_marker_marks_only_the_character() {
        let mut extraction = Extraction::default();
        extraction.add_line("··好");
        assert_eq!(extraction.marked.get(&'好'), Some(&1));
        assert_eq!(extraction.marked.len(), 1);
    }

    #[test]
    fn crlf_is_stripped() {
        let mut extraction = Extraction::default();
        extraction.add_line("中文\r\n");
        assert_eq!(extraction.total, 2);
    }
}
