use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::MalformedRecord;

/// Full-width CJK punctuation and symbols stripped from transcript text.
/// Enumerated literally; membership is exactly this set.
const FULLWIDTH_PUNCTUATION: &str = "！？｡。＂＃＄％＆＇（）＊＋，－／：；＜＝＞＠［＼］＾＿｀｛｜｝～｟｠｢｣､、〃《》「」『』【】〔〕〖〗〘〙〚〛〜〝〞〟〰〾〿–—‘’‛“”„‟…‧﹏.";

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref FULLWIDTH: HashSet<char> = FULLWIDTH_PUNCTUATION.chars().collect();
}

/// Split a transcript record into its utterance id and raw text.
///
/// The id is everything before the first whitespace character. A line with
/// no whitespace at all has no separable id and is malformed.
pub fn parse_record(line: &str) -> Result<(&str, &str), MalformedRecord> {
    line.split_once(char::is_whitespace).ok_or(MalformedRecord)
}

/// Split a record like [`parse_record`], but tolerate an id-only line.
///
/// The text part is returned with its inter-token spacing already
/// collapsed; an id with no text yields an empty string. Only a completely
/// blank line is malformed.
pub fn parse_record_lenient(line: &str) -> Result<(&str, String), MalformedRecord> {
    let mut tokens = line.split_whitespace();
    let id = tokens.next().ok_or(MalformedRecord)?;

    Ok((id, tokens.collect()))
}

/// Clean up the text part of a record for frequency counting.
///
/// Steps, in order: join the whitespace-separated tokens with no separator,
/// strip `<...>` tags (shortest span, every occurrence), drop ASCII and
/// full-width punctuation, upper-case, then drop ASCII digits and any
/// remaining spaces. Cased Latin letters survive as upper-case; CJK
/// characters pass through untouched.
pub fn normalize_text(text: &str) -> String {
    let joined: String = text.split_whitespace().collect();
    let untagged = TAG.replace_all(&joined, "");

    let unpunctuated: String = untagged
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !FULLWIDTH.contains(c))
        .collect();

    unpunctuated
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != ' ')
        .collect()
}

/// Parse one `<id> <text...>` record and normalize its text.
pub fn normalize_line(line: &str) -> Result<String, MalformedRecord> {
    let (_id, text) = parse_record(line)?;
    Ok(normalize_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_on_first_whitespace() {
        assert_eq!(parse_record("utt1 你好"), Ok(("utt1", "你好")));
        assert_eq!(parse_record("utt1 some more text"), Ok(("utt1", "some more text")));
        assert_eq!(parse_record("utt1\t你好"), Ok(("utt1", "你好")));
    }

    #[test]
    fn record_without_separator_is_malformed() {
        assert_eq!(parse_record("utt1"), Err(MalformedRecord));
        assert_eq!(parse_record(""), Err(MalformedRecord));
    }

    #[test]
    fn id_only_record_has_empty_text() {
        assert_eq!(parse_record("utt1 "), Ok(("utt1", "")));
        assert_eq!(normalize_line("utt1 "), Ok(String::new()));
    }

    #[test]
    fn lenient_record_tolerates_missing_text() {
        assert_eq!(parse_record_lenient("utt1"), Ok(("utt1", String::new())));
        assert_eq!(
            parse_record_lenient("utt1 你 好"),
            Ok(("utt1", "你好".to_string()))
        );
        assert_eq!(parse_record_lenient("   "), Err(MalformedRecord));
        assert_eq!(parse_record_lenient(""), Err(MalformedRecord));
    }

    #[test]
    fn token_boundaries_collapse() {
        assert_eq!(normalize_text("你好  世界"), "你好世界");
        assert_eq!(normalize_text(" 你 好 "), "你好");
    }

    #[test]
    fn tags_are_stripped() {
        assert_eq!(normalize_text("<noise>你好"), "你好");
        assert_eq!(normalize_text("你<a>好<b>吗"), "你好吗");
    }

    #[test]
    fn tag_spanning_a_token_boundary_is_stripped() {
        // token joining runs first, so "<spk 1>" becomes "<spk1>"
        assert_eq!(normalize_text("<spk 1> 你好"), "你好");
    }

    #[test]
    fn shortest_tag_span_wins() {
        // a greedy match would swallow the 好 between the two tags
        assert_eq!(normalize_text("<a>好<b>"), "好");
    }

    #[test]
    fn unpaired_angle_brackets_go_out_with_ascii_punctuation() {
        assert_eq!(normalize_text("你<好"), "你好");
    }

    #[test]
    fn ascii_punctuation_is_stripped() {
        assert_eq!(normalize_text("hi, there!"), "HITHERE");
        assert_eq!(normalize_text("a-b_c.d"), "ABCD");
    }

    #[test]
    fn fullwidth_punctuation_is_stripped() {
        assert_eq!(normalize_text("你好，世界！"), "你好世界");
        assert_eq!(normalize_text("《标题》：【注】"), "标题注");
        assert_eq!(normalize_text("一……二——三"), "一二三");
    }

    #[test]
    fn latin_is_uppercased() {
        assert_eq!(normalize_text("abc好def"), "ABC好DEF");
    }

    #[test]
    fn digits_are_stripped() {
        assert_eq!(normalize_text("第1名abc123"), "第名ABC");
    }

    #[test]
    fn mixed_record_normalizes_end_to_end() {
        assert_eq!(normalize_line("utt1 你好,世界！"), Ok("你好世界".to_string()));
        assert_eq!(
            normalize_line("BAC009S0002W0122 而 对 楼市 成交 抑制 作用 最 大 的 限 购"),
            Ok("而对楼市成交抑制作用最大的限购".to_string())
        );
    }
}
