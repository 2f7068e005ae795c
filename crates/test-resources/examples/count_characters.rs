use anyhow::Result;
use hsk_text::{extract_file, SortOrder};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run -p test-resources --example count_characters -- <text file> [limit]");
        return Ok(());
    }

    let path = Path::new(&args[1]);
    let limit = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    if !path.exists() {
        eprintln!("Error: {} not found.", path.display());
        return Ok(());
    }

    let extraction = extract_file(path)?;
    println!(
        "{} characters, {} unique, {} marked",
        extraction.total,
        extraction.unique(),
        extraction.marked.len()
    );
    println!("Top {} characters:", limit);
    println!("{:<4} | {:<4} | {:<8} | {:<6}", "Rank", "Char", "Count", "Marked");
    println!("{:-<4}-+-{:-<4}-+-{:-<8}-+-{:-<6}", "", "", "", "");

    for (i, (c, count)) in extraction.ordered(SortOrder::Frequency).iter().take(limit).enumerate() {
        let marked = extraction.marked.get(c).copied().unwrap_or(0);
        println!("{:<4} | {:<4} | {:<8} | {:<6}", i + 1, c, count, marked);
    }

    Ok(())
}
