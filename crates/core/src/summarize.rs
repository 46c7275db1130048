//! Extractive summaries: cue-word sentence selection over cleaned text.

/// Sentences containing any of these markers carry reported facts or
/// quantified claims and are preferred for the summary.
const CUE_WORDS: &[&str] = &[
    "据", "表示", "指出", "通过", "实现", "达到", "超过", "增长", "下降", "首次", "第一",
];

/// Tunables for summary extraction.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Hard cap on summary length in chars.
    pub max_chars: usize,
    /// How many sentences to keep.
    pub max_sentences: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        SummaryConfig { max_chars: 500, max_sentences: 3 }
    }
}

/// Builds an extractive summary from cleaned article text.
///
/// Cue-bearing sentences are taken in document order; if none qualify the
/// leading sentences stand in. Empty input yields an empty summary rather
/// than an error, articles without fetched bodies are a normal case.
pub fn summarize(text: &str, config: &SummaryConfig) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let sentences = split_sentences(text);
    let mut picked: Vec<&str> =
        sentences.iter().filter(|s| has_cue(s)).take(config.max_sentences).copied().collect();
    if picked.is_empty() {
        picked = sentences.iter().take(config.max_sentences).copied().collect();
    }

    truncate_chars(&picked.join(""), config.max_chars)
}

fn has_cue(sentence: &str) -> bool {
    CUE_WORDS.iter().any(|cue| sentence.contains(cue))
}

/// Splits on CJK terminal punctuation, keeping the terminator with its
/// sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if matches!(ch, '。' | '！' | '？') {
            let end = i + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
