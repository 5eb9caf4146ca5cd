use unicode_normalization::UnicodeNormalization;

const QUOTES: [char; 2] = ['\'', '"'];

/// Translations up to this many characters are kept verbatim (acronyms like "ИИ")
const VERBATIM_MAX_CHARS: usize = 3;

const MIN_KEY_CHARS: usize = 2;

/// Lowercase, trim and strip one surrounding quote on each side.
///
/// Used for keys coming from JSON sources, where phrases and unusual
/// characters are legitimate.
pub fn canonical_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut key = lowered.trim();
    if let Some(rest) = key.strip_prefix(QUOTES) {
        key = rest;
    }
    if let Some(rest) = key.strip_suffix(QUOTES) {
        key = rest;
    }
    key.to_string()
}

/// Canonical key restricted to single words: at least two characters, only
/// ASCII letters, apostrophe and hyphen.
pub fn normalize_key(raw: &str) -> Option<String> {
    let key = canonical_key(raw);
    let valid = key.chars().count() >= MIN_KEY_CHARS
        && key
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '\'' || c == '-');
    valid.then_some(key)
}

/// Sentence case for anything longer than an acronym
pub fn normalize_translation(raw: &str) -> String {
    let text: String = raw.trim().nfc().collect();
    if text.chars().count() <= VERBATIM_MAX_CHARS {
        return text;
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => text,
    }
}

/// True if the text holds at least one Cyrillic character
pub fn has_target_script(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// True for all-caps output from machine translation ("ДЛИНА")
pub fn is_shouting(text: &str) -> bool {
    text.chars().count() > VERBATIM_MAX_CHARS
        && text.chars().any(char::is_alphabetic)
        && text.to_uppercase() == text
}

/// Validate a remote translation of `source`: rejects blanks, echoes of the
/// source word and text without any Cyrillic.
pub fn accept_remote(source: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty()
        || candidate.to_lowercase() == source.trim().to_lowercase()
        || !has_target_script(candidate)
    {
        return None;
    }
    Some(normalize_translation(candidate))
}
