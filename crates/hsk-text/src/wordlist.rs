use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Writes `character,count` rows without a header, in the order given.
pub fn write_counts<W, I>(entries: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (char, usize)>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut buf = [0u8; 4];
    for (character, count) in entries {
        let count = count.to_string();
        writer.write_record([character.encode_utf8(&mut buf).as_bytes(), count.as_bytes()])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_counts_to_path<I>(entries: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = (char, usize)>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_counts(entries, file).with_context(|| format!("Failed to write {:?}", path))?;
    log::info!("Wrote word list to {:?}", path);
    Ok(())
}

/// Reads the first column of a word list back as a set.
///
/// A row without a comma is taken whole. Blank rows and rows with an empty
/// first column are ignored, since an empty key would match every line.
pub fn read_highlighted<R: BufRead>(reader: R) -> Result<BTreeSet<String>> {
    let mut words = BTreeSet::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let key = match line.split_once(',') {
            Some((key, _)) => key,
            None => line,
        };
        if key.is_empty() {
            continue;
        }
        words.insert(key.to_string());
    }

    Ok(words)
}

pub fn read_highlighted_path(path: &Path) -> Result<BTreeSet<String>> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let words = read_highlighted(BufReader::new(file))
        .with_context(|| format!("Failed to read {:?}", path))?;
    log::info!("Loaded {} highlighted words from {:?}", words.len(), path);
    Ok(words)
}
