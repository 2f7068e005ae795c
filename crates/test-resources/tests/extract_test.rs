use hsk_text::{accumulate, extract_file, Extraction, SortOrder};
use std::collections::BTreeMap;
use test_resources::{write_fixture, SAMPLE_TEXT};

fn as_map(entries: &[(char, usize)]) -> BTreeMap<char, usize> {
    entries.iter().copied().collect()
}

#[test]
fn test_marked_and_all_counts() {
    let extraction = accumulate(["我·爱·中国·人"]);

    let marked: Vec<(char, usize)> = extraction.marked_entries();
    assert_eq!(marked, vec![('爱', 1), ('中', 1), ('人', 1)]);

    let all = extraction.ordered(SortOrder::Appearance);
    assert_eq!(all, vec![('我', 1), ('爱', 1), ('中', 1), ('国', 1), ('人', 1)]);

    assert_eq!(extraction.total, 5);
    assert_eq!(extraction.unique(), 5);
}

#[test]
fn test_counts_accumulate_across_lines() {
    let extraction = accumulate(["·好好学习\n", "天天·向上，好！\n", "\n", "·好"]);

    assert_eq!(extraction.marked.get(&'好'), Some(&2));
    assert_eq!(extraction.marked.get(&'向'), Some(&1));
    assert_eq!(extraction.all.get(&'好'), Some(&4));
    assert_eq!(extraction.all.get(&'天'), Some(&2));
    assert_eq!(extraction.total, 10);
    assert_eq!(extraction.unique(), 6);
}

#[test]
fn test_trailing_interpunct_is_ignored() {
    let extraction = accumulate(["你好·", "·"]);
    assert!(extraction.marked.is_empty());
    assert_eq!(extraction.total, 2);
}

#[test]
fn test_marker_separated_by_latin_text_still_marks() {
    // filtering runs before the marker scan
    let extraction = accumulate(["· x 字"]);
    assert_eq!(extraction.marked.get(&'字'), Some(&1));
}

#[test]
fn test_marked_is_subset_of_all() {
    let extraction = accumulate(SAMPLE_TEXT.lines());
    assert!(!extraction.marked.is_empty());
    for (c, n) in &extraction.marked {
        let total = extraction.all.get(c).copied().unwrap_or(0);
        assert!(total >= *n, "{} marked {} times but seen {} times", c, n, total);
    }
}

#[test]
fn test_totals_match_counts() {
    let extraction = accumulate(SAMPLE_TEXT.lines());
    assert_eq!(extraction.all.values().sum::<usize>(), extraction.total);
    assert_eq!(extraction.all.len(), extraction.unique());
}

#[test]
fn test_frequency_order_is_stable_descending() {
    let extraction = accumulate(["甲乙乙丙丙丙丁戊"]);
    let ordered = extraction.ordered(SortOrder::Frequency);
    assert_eq!(
        ordered,
        vec![('丙', 3), ('乙', 2), ('甲', 1), ('丁', 1), ('戊', 1)]
    );
}

#[test]
fn test_alphabetic_order_by_code_point() {
    let extraction = accumulate(["中国人"]);
    let ordered = extraction.ordered(SortOrder::Alphabetic);
    // 中 U+4E2D, 人 U+4EBA, 国 U+56FD
    assert_eq!(ordered, vec![('中', 1), ('人', 1), ('国', 1)]);
}

#[test]
fn test_orderings_are_permutations() {
    let extraction: Extraction = accumulate(SAMPLE_TEXT.lines());
    let appearance = extraction.ordered(SortOrder::Appearance);
    let frequency = extraction.ordered(SortOrder::Frequency);
    let alphabetic = extraction.ordered(SortOrder::Alphabetic);

    assert_eq!(appearance.len(), extraction.unique());
    assert_eq!(as_map(&appearance), as_map(&frequency));
    assert_eq!(as_map(&appearance), as_map(&alphabetic));
}

#[test]
fn test_ordering_does_not_touch_counts() {
    let extraction = accumulate(SAMPLE_TEXT.lines());
    let before = extraction.clone();
    let _ = extraction.ordered(SortOrder::Frequency);
    let _ = extraction.ordered(SortOrder::Alphabetic);
    assert_eq!(extraction, before);
}

#[test]
fn test_sort_order_parsing() {
    assert_eq!("appearance".parse::<SortOrder>().unwrap(), SortOrder::Appearance);
    assert_eq!("Frequency".parse::<SortOrder>().unwrap(), SortOrder::Frequency);
    assert_eq!("3".parse::<SortOrder>().unwrap(), SortOrder::Alphabetic);
    assert_eq!("2".parse::<SortOrder>().unwrap(), SortOrder::Frequency);
    assert_eq!("1".parse::<SortOrder>().unwrap(), SortOrder::Appearance);
    // integers outside 1..=3 are rejected rather than falling back
    assert!("7".parse::<SortOrder>().is_err());
    assert!("0".parse::<SortOrder>().is_err());
    assert!("strokes".parse::<SortOrder>().is_err());
    assert_eq!(SortOrder::default(), SortOrder::Appearance);
}

#[test]
fn test_extract_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "text.txt", SAMPLE_TEXT).unwrap();

    let extraction = extract_file(&path).unwrap();
    assert_eq!(extraction, accumulate(SAMPLE_TEXT.lines()));
    assert_eq!(extraction.marked.get(&'学'), Some(&2));
}

#[test]
fn test_extract_file_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.txt");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("·好字".as_bytes());
    std::fs::write(&path, bytes).unwrap();

    let extraction = extract_file(&path).unwrap();
    assert_eq!(extraction.marked_entries(), vec![('好', 1)]);
    assert_eq!(extraction.total, 2);
}

#[test]
fn test_extract_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(extract_file(&dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_extract_invalid_utf8_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, [0x66, 0xFF, 0xFE, 0x00, 0xC3]).unwrap();
    // 0xFF 0xFE at offset 1 is not a BOM, so the bytes are taken as UTF-8
    assert!(extract_file(&path).is_err());
}
