/// Characters removed before words are compared.
pub const STRIPPED_PUNCTUATION: [char; 14] = [
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// Lowercases `text`, drops [`STRIPPED_PUNCTUATION`] and collapses whitespace
/// runs into single spaces.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into word tokens, keeping order and duplicates.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
