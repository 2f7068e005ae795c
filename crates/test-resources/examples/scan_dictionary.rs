use anyhow::Result;
use hsk_text::{DictionaryScanner, MalformedLog};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run -p test-resources --example scan_dictionary -- <dictionary> <word>...");
        return Ok(());
    }

    let dictionary = Path::new(&args[1]);
    let words = args[2..].iter().cloned().collect();

    let scanner = DictionaryScanner::new(words, MalformedLog::default())?;
    let report = scanner.scan_path(dictionary)?;

    println!("Found {} rows ({} malformed)", report.matched.len(), report.malformed.len());
    for row in &report.matched {
        print!("{}", row);
    }

    Ok(())
}
