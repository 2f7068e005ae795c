/// Marker placed in front of a character of interest in the source text.
pub const INTERPUNCT: char = '\u{00B7}';

const CJK_START: char = '\u{4E00}';
const CJK_END: char = '\u{9FA5}';

pub fn is_kept(c: char) -> bool {
    c == INTERPUNCT || (CJK_START..=CJK_END).contains(&c)
}

/// Strips everything except CJK ideographs and the interpunct marker.
///
/// Surviving characters keep their relative order, so an interpunct still sits
/// right in front of the character it marks once Latin text, digits,
/// punctuation and whitespace have been dropped.
pub fn filter_chinese(text: &str) -> String {
    text.chars().filter(|&c| is_kept(c)).collect()
}
