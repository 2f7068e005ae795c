use anyhow::Result;
use clap::Parser;
use hsk_text::pipeline::{self, Options};
use hsk_text::{MalformedLog, SortOrder};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chinese character statistics and HSK dictionary lookup", long_about = None)]
struct Args {
    /// Source text to scan
    #[arg(long, default_value = "File1_chinese_text.txt")]
    input: PathBuf,

    /// Where to write the marked character table
    #[arg(long, default_value = "tmp1.csv")]
    highlighted: PathBuf,

    /// Where to write the full character frequency table
    #[arg(long, default_value = "tmp2.csv")]
    statistic: PathBuf,

    /// Skip writing the full frequency table
    #[arg(long, default_value_t = false)]
    no_statistic: bool,

    /// Order of the frequency table: appearance, frequency or alphabetic (1, 2, 3)
    #[arg(long, default_value = "frequency")]
    order: SortOrder,

    /// HTML formatted vocabulary dictionary to search
    #[arg(long, default_value = "File2_hsk_2_by_chapter_a-_vocabulary_20220314050202.csv")]
    html: PathBuf,

    /// Where to write the matching dictionary rows
    #[arg(long, default_value = "tmp3.csv")]
    output: PathBuf,

    /// Append-only log of malformed dictionary rows
    #[arg(long, default_value = MalformedLog::DEFAULT_PATH)]
    log_file: PathBuf,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Options {
            input: args.input,
            highlighted: args.highlighted,
            statistic: (!args.no_statistic).then_some(args.statistic),
            order: args.order,
            html: args.html,
            output: args.output,
            log_file: args.log_file,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::from(Args::parse());
    let report = pipeline::run(&options);

    if let Some(extraction) = &report.extraction {
        println!("---total number of characters = {}", extraction.total);
        println!("---unique number of characters = {}", extraction.unique());
    }
    if report.failures() > 0 {
        log::warn!("{} step(s) failed, see messages above", report.failures());
    }

    Ok(())
}
