//! Reading time estimation

/// Count words in raw document content
///
/// Counts runs of ASCII alphanumerics as single words and CJK ideographs
/// one by one, so mixed-language documents get a sensible estimate.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if c > '\u{4E00}' && c < '\u{9FFF}' {
            // Chinese characters
            count += 1;
            in_word = false;
        } else {
            in_word = false;
        }
    }

    count
}

/// Estimate reading time for raw document content
///
/// Divides the word count by `words_per_minute` and rounds up, formatted
/// as `"N min read"`. An empty body yields `"0 min read"`.
pub fn reading_time(text: &str, words_per_minute: usize) -> String {
    let words = count_words(text);
    let minutes = words.div_ceil(words_per_minute.max(1));
    format!("{} min read", minutes)
}
