//! Shared fixtures for the integration tests and example programs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample text with interpunct markers, mixed with Latin text and punctuation.
pub const SAMPLE_TEXT: &str = "A- 我·爱·中国·人\nB- 今天天气很好！\nC- Hello, ·学生 and ·学习.\n";

/// Dictionary rows in the HSK vocabulary export layout.
pub const SAMPLE_DICTIONARY: &str = "\
<b>爱</b>,ài,to love\n\
<b>学生</b>,xuésheng,student\n\
<b>爱<,broken,row\n\
<i>天气</i>,tiānqì,weather\n\
<b>老师</b>,lǎoshī,teacher\n";

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write fixture {:?}", path))?;
    Ok(path)
}
