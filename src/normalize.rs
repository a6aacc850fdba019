//! Pure field transforms applied to the decoded model response.
//!
//! Every function here is total: it accepts any input and returns a (possibly empty)
//! string. Emptiness is judged later, when the pipeline validates the record.

use serde_json::Value;
use std::collections::HashSet;

/// Maximum number of keywords kept on the output line.
pub const MAX_KEYWORDS: usize = 20;

/// Maximum number of words that make up a slug.
pub const MAX_SLUG_WORDS: usize = 3;

const BYTE_ORDER_MARK: char = '\u{feff}';
const TRAILING_PERIODS: [char; 2] = ['.', '。'];
const KEYWORD_DELIMITERS: [char; 4] = [',', ';', '\n', '|'];
const KEYWORD_TRAILING_PUNCTUATION: [char; 4] = ['.', ',', ';', ':'];

/// Coerces a JSON value to text. `null` becomes the empty string, strings are taken
/// verbatim, arrays are joined with `,` and everything else uses its JSON rendering.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Collapses every whitespace run to one space and trims both ends.
///
/// U+FEFF counts as whitespace here; `char::is_whitespace` does not include it.
pub fn one_line(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-lines `s` and removes at most one trailing `.` or `。`.
pub fn strip_trailing_period(s: &str) -> String {
    let mut line = one_line(s);
    if line.ends_with(&TRAILING_PERIODS[..]) {
        line.pop();
        line.truncate(line.trim_end().len());
    }
    line
}

/// Removes `{` and `}` so free text can never form a placeholder token.
pub fn strip_placeholder_braces(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}

/// Prepares a description for insertion into the caption template.
///
/// A clause left with no letter or digit (e.g. `"..."`) is reduced to the empty string.
pub fn caption_clause(s: &str) -> String {
    let clause = strip_placeholder_braces(&strip_trailing_period(s));
    if clause.chars().any(char::is_alphanumeric) {
        clause
    } else {
        String::new()
    }
}

/// Derives the camel-cased slug from up to three words of `input`.
///
/// `"night market"` becomes `"NightMarket"`. Existing capitals inside a word are
/// lowercased, and punctuation splits words rather than joining them.
pub fn to_camel_case_words(input: &str) -> String {
    let cleaned: String = one_line(input)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .take(MAX_SLUG_WORDS)
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Cleans a single keyword: drops braces, leading hashtags and trailing punctuation.
pub fn sanitize_keyword(k: &str) -> String {
    let without_braces = strip_placeholder_braces(k.trim());
    let without_hashes = without_braces.trim_start_matches('#');
    let collapsed = one_line(without_hashes);
    collapsed
        .trim_end_matches(&KEYWORD_TRAILING_PUNCTUATION[..])
        .trim()
        .to_string()
}

/// Normalizes the `keywords` field, which may be an array or a delimited string.
///
/// Any other JSON type yields no keywords.
pub fn normalize_keywords(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => normalize_keyword_list(items.iter().map(value_to_text)),
        Value::String(s) => normalize_keyword_list(split_keywords(s)),
        _ => Vec::new(),
    }
}

/// Splits a delimited keyword string on runs of `,`, `;`, newline or `|`.
pub fn split_keywords(s: &str) -> impl Iterator<Item = &str> {
    s.split(&KEYWORD_DELIMITERS[..]).filter(|part| !part.is_empty())
}

/// Sanitizes, de-duplicates (case-insensitively) and caps a keyword sequence.
///
/// The first occurrence of a keyword keeps its original casing. Entries that sanitize
/// to nothing are skipped, and anything past [`MAX_KEYWORDS`] is ignored.
pub fn normalize_keyword_list<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for candidate in candidates {
        let keyword = sanitize_keyword(candidate.as_ref());
        if keyword.is_empty() {
            continue;
        }
        if !seen.insert(keyword.to_lowercase()) {
            continue;
        }
        out.push(keyword);
        if out.len() >= MAX_KEYWORDS {
            break;
        }
    }

    out
}
