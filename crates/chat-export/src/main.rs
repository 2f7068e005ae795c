use anyhow::Result;
use chat_export::ChatExport;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert chat export JSON into a CSV transcript", long_about = None)]
struct Args {
    /// Chat export JSON file
    #[arg(short, long, default_value = "input.json")]
    input: PathBuf,

    /// CSV transcript to write
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Drop messages that contain no Chinese characters
    #[arg(long, default_value_t = false)]
    ignore_non_chinese: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Loading chat export from {:?}", args.input);
    let mut transcript = ChatExport::from_path(&args.input)?.normalize()?;
    log::info!(
        "{} conversations, {} rich text messages",
        transcript.conversations.len(),
        transcript.message_count()
    );

    if args.ignore_non_chinese {
        transcript.retain_chinese();
        log::info!("{} messages left after dropping non-Chinese ones", transcript.message_count());
    }

    transcript.export_to_path(&args.output)?;
    Ok(())
}
