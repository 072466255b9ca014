//! Word and reading-time statistics derived from rendered plain text.

use crate::constants::READING_SPEED_WPM;

/// Count whitespace-delimited tokens in markup-stripped text.
pub fn word_count(plain_text: &str) -> usize {
    plain_text.split_whitespace().count()
}

/// Human-readable reading-time estimate, rounded up to whole minutes.
///
/// # Returns
/// A label such as `"3 min read"`.
pub fn reading_time_label(words: usize) -> String {
    let minutes = words.div_ceil(READING_SPEED_WPM);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::{reading_time_label, word_count};

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one two\tthree\nfour"), 4);
    }

    #[test]
    fn reading_time_rounds_up_to_whole_minutes() {
        assert_eq!(reading_time_label(0), "0 min read");
        assert_eq!(reading_time_label(1), "1 min read");
        assert_eq!(reading_time_label(300), "1 min read");
        assert_eq!(reading_time_label(301), "2 min read");
    }
}
