use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::dictionary::{write_matches, DictionaryScanner, MalformedLog};
use crate::extract::{accumulate, read_source, Extraction, SortOrder};
use crate::wordlist::{read_highlighted_path, write_counts_to_path};

/// Paths and switches for one end-to-end run.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: PathBuf,
    pub highlighted: PathBuf,
    /// `None` skips the full frequency table.
    pub statistic: Option<PathBuf>,
    pub order: SortOrder,
    pub html: PathBuf,
    pub output: PathBuf,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Extract,
    WriteHighlighted,
    WriteStatistic,
    ReadHighlighted,
    SearchDictionary,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Extract => "extract characters",
            Step::WriteHighlighted => "write highlighted words",
            Step::WriteStatistic => "write statistics",
            Step::ReadHighlighted => "read highlighted words",
            Step::SearchDictionary => "search dictionary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Done,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub status: Status,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
    pub extraction: Option<Extraction>,
}

impl RunReport {
    pub fn status(&self, step: Step) -> Option<&Status> {
        self.steps.iter().find(|o| o.step == step).map(|o| &o.status)
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|o| matches!(o.status, Status::Failed(_)))
            .count()
    }

    fn record<T>(&mut self, step: Step, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.steps.push(StepOutcome { step, status: Status::Done });
                Some(value)
            }
            Err(e) => {
                log::error!("{} failed: {:#}", step, e);
                eprintln!("I/O error: {:#}", e);
                self.steps.push(StepOutcome {
                    step,
                    status: Status::Failed(format!("{:#}", e)),
                });
                None
            }
        }
    }

    fn skip(&mut self, step: Step) {
        log::warn!("Skipping {}", step);
        self.steps.push(StepOutcome {
            step,
            status: Status::Skipped,
        });
    }
}

/// Runs extraction, table output and the dictionary search in order.
///
/// A failing step is reported and recorded; the steps after it still run on
/// whatever data is available.
pub fn run(options: &Options) -> RunReport {
    let mut report = RunReport::default();

    let extraction = report.record(Step::Extract, extract(&options.input));

    let words = match &extraction {
        Some(extraction) => {
            let written = report
                .record(
                    Step::WriteHighlighted,
                    write_counts_to_path(extraction.marked_entries(), &options.highlighted),
                )
                .is_some();

            match &options.statistic {
                Some(statistic) => {
                    log::info!("Statistics ordered by {}", options.order);
                    report.record(
                        Step::WriteStatistic,
                        write_counts_to_path(extraction.ordered(options.order), statistic),
                    );
                }
                None => report.skip(Step::WriteStatistic),
            }

            if written {
                report.record(Step::ReadHighlighted, read_highlighted_path(&options.highlighted))
            } else {
                // The file on disk is not this run's table.
                report.skip(Step::ReadHighlighted);
                log::warn!("Searching with the {} marked characters held in memory", extraction.marked.len());
                Some(extraction.marked.keys().map(|c| c.to_string()).collect())
            }
        }
        None => {
            report.skip(Step::WriteHighlighted);
            report.skip(Step::WriteStatistic);
            log::warn!(
                "No extraction available, {:?} may be left over from an earlier run",
                options.highlighted
            );
            report.record(Step::ReadHighlighted, read_highlighted_path(&options.highlighted))
        }
    };

    report.record(
        Step::SearchDictionary,
        search_dictionary(&options.html, words.unwrap_or_default(), &options.log_file, &options.output),
    );

    report.extraction = extraction;
    report
}

fn progress_bar(len: usize, label: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} lines",
                label
            ))?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn extract(input: &Path) -> Result<Extraction> {
    log::info!("Reading source text from {:?}", input);
    let text = read_source(input)?;
    let lines: Vec<&str> = text.lines().collect();

    let pb = progress_bar(lines.len(), "Counting")?;
    let extraction = accumulate(pb.wrap_iter(lines.into_iter()));
    pb.finish_and_clear();

    log::info!(
        "{} characters, {} unique, {} marked",
        extraction.total,
        extraction.unique(),
        extraction.marked.len()
    );
    Ok(extraction)
}

fn search_dictionary(
    html: &Path,
    words: BTreeSet<String>,
    log_file: &Path,
    output: &Path,
) -> Result<()> {
    log::info!("Searching {:?} for {} words", html, words.len());
    let scanner = DictionaryScanner::new(words, MalformedLog::new(log_file))?;

    let text = read_source(html)?;
    let rows: Vec<&str> = text.split_inclusive('\n').collect();

    let pb = progress_bar(rows.len(), "Scanning")?;
    let report = scanner.scan_lines(pb.wrap_iter(rows.into_iter()));
    pb.finish_and_clear();

    if !report.malformed.is_empty() {
        log::warn!(
            "{} malformed rows appended to {:?}",
            report.malformed.len(),
            log_file
        );
    }

    write_matches(&report.matched, output)
}
