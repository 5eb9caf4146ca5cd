use crate::Translation;
use crate::dictionary::TranslationSource;

/// Shortest base form worth looking up
const MIN_BASE_CHARS: usize = 2;

/// Recovers translations for inflected words from their base form
pub trait BaseFormResolver: Send + Sync {
    /// Ordered base forms to try for `key`, most specific first
    fn candidates(&self, key: &str) -> Vec<BaseFormCandidate>;

    /// First candidate found in `curated`, then `bilingual`, wins
    fn resolve(
        &self,
        key: &str,
        curated: &dyn TranslationSource,
        bilingual: &dyn TranslationSource,
    ) -> Option<Resolution> {
        self.candidates(key)
            .into_iter()
            .filter(|c| c.base_form.chars().count() >= MIN_BASE_CHARS)
            .find_map(|candidate| {
                curated
                    .lookup(&candidate.base_form)
                    .or_else(|| bilingual.lookup(&candidate.base_form))
                    .map(|translation| Resolution {
                        translation: translation.clone(),
                        candidate,
                    })
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFormCandidate {
    pub base_form: String,
    /// Rule that produced the candidate, for logs
    pub rule: &'static str,
}

impl BaseFormCandidate {
    pub fn new(base_form: impl Into<String>, rule: &'static str) -> Self {
        Self {
            base_form: base_form.into(),
            rule,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub translation: Translation,
    pub candidate: BaseFormCandidate,
}

/// Resolver that never finds anything
pub struct NoResolver;

impl BaseFormResolver for NoResolver {
    fn candidates(&self, _key: &str) -> Vec<BaseFormCandidate> {
        Vec::new()
    }
}
