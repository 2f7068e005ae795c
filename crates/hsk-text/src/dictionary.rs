use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::extract::read_source;

const TAG_PATTERN: &str = "<.*?>";

/// Append-only record of dictionary keys that failed the tag check.
#[derive(Debug, Clone)]
pub struct MalformedLog {
    path: PathBuf,
}

impl MalformedLog {
    pub const DEFAULT_PATH: &'static str = "logfile.log";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends one entry. A failure is reported for this entry only and the
    /// caller carries on.
    pub fn append(&self, entry: &str) -> bool {
        match self.try_append(entry) {
            Ok(()) => true,
            Err(e) => {
                log::error!("I/O error: {:#}", e);
                false
            }
        }
    }

    fn try_append(&self, entry: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file {:?}", self.path))?;
        writeln!(file, "{}", entry)
            .with_context(|| format!("Failed to append to {:?}", self.path))?;
        Ok(())
    }
}

impl Default for MalformedLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    WellFormed,
    Malformed,
}

/// One dictionary row split into the parts the scanner looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryLine<'a> {
    /// The row as read, line terminator included.
    pub raw: &'a str,
    /// First comma-separated field, terminator removed.
    pub key: &'a str,
    /// `key` with every `<...>` tag removed.
    pub cleaned: String,
    pub class: LineClass,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matching rows in source order, each newline terminated.
    pub matched: Vec<String>,
    /// Raw keys of the rows rejected by the tag check.
    pub malformed: Vec<String>,
}

pub struct DictionaryScanner {
    targets: BTreeSet<String>,
    log: MalformedLog,
    tag: Regex,
}

impl DictionaryScanner {
    pub fn new(targets: BTreeSet<String>, log: MalformedLog) -> Result<Self> {
        Ok(Self {
            targets,
            log,
            tag: Regex::new(TAG_PATTERN)?,
        })
    }

    pub fn classify<'a>(&self, raw: &'a str) -> DictionaryLine<'a> {
        let line = raw.trim_end_matches(['\r', '\n']);
        let key = match line.split_once(',') {
            Some((key, _)) => key,
            None => line,
        };

        let cleaned = self.tag.replace_all(key, "").into_owned();
        let class = if cleaned.contains(['<', '>']) {
            LineClass::Malformed
        } else {
            LineClass::WellFormed
        };

        DictionaryLine {
            raw,
            key,
            cleaned,
            class,
        }
    }

    /// Scans rows in order. Malformed rows are logged and never matched; a
    /// well-formed row is kept once if any target occurs in its raw key.
    pub fn scan_lines<I, S>(&self, lines: I) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ScanReport::default();

        for line in lines {
            let entry = self.classify(line.as_ref());
            match entry.class {
                LineClass::Malformed => {
                    log::warn!("wrong format! --- {}", entry.key);
                    self.log.append(entry.key);
                    report.malformed.push(entry.key.to_string());
                }
                LineClass::WellFormed => {
                    if self.targets.iter().any(|word| entry.key.contains(word.as_str())) {
                        let mut row = entry.raw.to_string();
                        if !row.ends_with('\n') {
                            row.push('\n');
                        }
                        report.matched.push(row);
                    }
                }
            }
        }

        log::info!(
            "Dictionary scan: {} matched, {} malformed",
            report.matched.len(),
            report.malformed.len()
        );
        report
    }

    pub fn scan_path(&self, source: &Path) -> Result<ScanReport> {
        let text = read_source(source)?;
        Ok(self.scan_lines(text.split_inclusive('\n')))
    }
}

/// Writes matched rows verbatim. Nothing is retried on failure.
pub fn write_matches(rows: &[String], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writer.write_all(row.as_bytes())?;
    }
    writer.flush()?;

    log::info!("Wrote {} dictionary rows to {:?}", rows.len(), path);
    Ok(())
}
