use podlex_core::language::{BaseFormCandidate, BaseFormResolver};

/// Generic suffixes tried last, with the number of characters they strip.
/// A suffix only applies when the word is more than two characters longer
/// than the stripped part.
const SUFFIXES: [(&str, usize); 12] = [
    ("ly", 2),
    ("ily", 3),
    ("er", 2),
    ("est", 3),
    ("ness", 4),
    ("ment", 4),
    ("tion", 4),
    ("ity", 3),
    ("ful", 3),
    ("less", 4),
    ("es", 2),
    ("s", 1),
];

/// Suffix-stripping rules for common English inflections
pub struct EnglishMorphology;

impl EnglishMorphology {
    pub fn new() -> Self {
        Self
    }

    /// Transcripts drop the final g: "breakin" → "breaking"
    fn dropped_g(&self, word: &str) -> Vec<BaseFormCandidate> {
        match word.strip_suffix("in") {
            Some(stem) if word.len() > 5 => vec![BaseFormCandidate::new(format!("{stem}ing"), "dropped g")],
            _ => Vec::new(),
        }
    }

    /// running → run, making → make, breaking → break
    fn gerund(&self, word: &str) -> Vec<BaseFormCandidate> {
        let mut results = Vec::new();

        let Some(stem) = word.strip_suffix("ing").filter(|_| word.len() > 5) else {
            return results;
        };

        results.push(BaseFormCandidate::new(stem, "-ing"));

        let bytes = stem.as_bytes();
        if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
            results.push(BaseFormCandidate::new(&stem[..stem.len() - 1], "-ing, doubled consonant"));
        }

        results.push(BaseFormCandidate::new(format!("{stem}e"), "-ing, silent e"));
        results
    }

    /// used → use, walked → walk
    fn past(&self, word: &str) -> Vec<BaseFormCandidate> {
        match word.strip_suffix("ed") {
            Some(stem) if word.len() > 4 => vec![
                BaseFormCandidate::new(stem, "-ed"),
                BaseFormCandidate::new(format!("{stem}e"), "-ed, silent e"),
            ],
            _ => Vec::new(),
        }
    }

    /// properties → property
    fn plural_y(&self, word: &str) -> Vec<BaseFormCandidate> {
        match word.strip_suffix("ies") {
            Some(stem) if word.len() > 4 => vec![BaseFormCandidate::new(format!("{stem}y"), "-ies")],
            _ => Vec::new(),
        }
    }

    fn suffix_table(&self, word: &str) -> Vec<BaseFormCandidate> {
        let mut results = Vec::new();

        for (suffix, len) in SUFFIXES {
            if !word.ends_with(suffix) || word.len() <= len + 2 {
                continue;
            }
            let base = &word[..word.len() - len];
            results.push(BaseFormCandidate::new(base, suffix));

            // connection → connect, scarcity → scarce
            match suffix {
                "tion" => results.push(BaseFormCandidate::new(format!("{base}t"), "-tion")),
                "ity" => results.push(BaseFormCandidate::new(format!("{base}e"), "-ity")),
                _ => {}
            }
        }

        results
    }
}

impl Default for EnglishMorphology {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseFormResolver for EnglishMorphology {
    fn candidates(&self, key: &str) -> Vec<BaseFormCandidate> {
        // Keys are ASCII after normalization; anything else has no English inflection
        if !key.is_ascii() {
            return vec![BaseFormCandidate::new(key, "direct")];
        }

        let mut results = Vec::new();
        results.extend(self.dropped_g(key));
        results.push(BaseFormCandidate::new(key, "direct"));
        results.extend(self.gerund(key));
        results.extend(self.past(key));
        results.extend(self.plural_y(key));
        results.extend(self.suffix_table(key));
        results
    }
}

#[cfg(test)]
mod tests {
    use podlex_core::Translation;
    use podlex_core::dictionary::Glossary;

    use super::*;

    fn bilingual(pairs: &[(&str, &str)]) -> Glossary {
        Glossary::from_pairs("bilingual", pairs.iter().map(|(k, v)| (*k, Translation::single(*v))))
    }

    fn resolve(word: &str, curated: &Glossary, bilingual: &Glossary) -> Option<String> {
        EnglishMorphology::new()
            .resolve(word, curated, bilingual)
            .and_then(|r| r.translation.primary().map(str::to_string))
    }

    #[test]
    fn gerund_resolves_to_verb() {
        let source = bilingual(&[("break", "ломать")]);
        assert_eq!(resolve("breaking", &Glossary::new("curated"), &source), Some("ломать".into()));
    }

    #[test]
    fn plural_ies_resolves_to_singular() {
        let source = bilingual(&[("property", "свойство")]);
        assert_eq!(resolve("properties", &Glossary::new("curated"), &source), Some("свойство".into()));
    }

    #[test]
    fn transcript_dropped_g() {
        let source = bilingual(&[("breaking", "прорыв"), ("break", "ломать")]);
        assert_eq!(resolve("breakin", &Glossary::new("curated"), &source), Some("прорыв".into()));
    }

    #[test]
    fn doubled_consonant_and_silent_e() {
        let source = bilingual(&[("run", "бежать"), ("make", "делать"), ("use", "использовать")]);
        let curated = Glossary::new("curated");
        assert_eq!(resolve("running", &curated, &source), Some("бежать".into()));
        assert_eq!(resolve("making", &curated, &source), Some("делать".into()));
        assert_eq!(resolve("used", &curated, &source), None);
        assert_eq!(resolve("reused", &curated, &source), None);
        assert_eq!(resolve("caused", &curated, &bilingual(&[("cause", "причина")])), Some("причина".into()));
    }

    #[test]
    fn suffix_table_variants() {
        let source = bilingual(&[
            ("connect", "соединять"),
            ("scarce", "скудный"),
            ("kind", "добрый"),
            ("quick", "быстрый"),
            ("node", "узел"),
        ]);
        let curated = Glossary::new("curated");
        assert_eq!(resolve("connection", &curated, &source), Some("соединять".into()));
        assert_eq!(resolve("scarcity", &curated, &source), Some("скудный".into()));
        assert_eq!(resolve("kindness", &curated, &source), Some("добрый".into()));
        assert_eq!(resolve("quickly", &curated, &source), Some("быстрый".into()));
        assert_eq!(resolve("nodes", &curated, &source), Some("узел".into()));
    }

    #[test]
    fn curated_checked_before_bilingual_for_each_candidate() {
        let source = bilingual(&[("stream", "ручей")]);
        let curated = Glossary::from_pairs("curated", [("stream", Translation::single("Поток"))]);
        assert_eq!(resolve("streaming", &curated, &source), Some("Поток".into()));
    }

    #[test]
    fn short_words_are_left_alone() {
        let source = bilingual(&[("up", "вверх"), ("ow", "ой")]);
        let curated = Glossary::new("curated");
        assert_eq!(resolve("ups", &curated, &source), None);
        assert_eq!(resolve("owed", &curated, &source), None);
    }

    #[test]
    fn candidate_order() {
        let candidates: Vec<_> = EnglishMorphology::new()
            .candidates("stopping")
            .into_iter()
            .map(|c| c.base_form)
            .collect();
        assert_eq!(candidates, ["stopping", "stopp", "stop", "stoppe"]);
    }
}
