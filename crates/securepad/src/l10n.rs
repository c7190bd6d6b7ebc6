//! Keypad label localization.
//!
//! Labels are resolved once per session from the configured locale, the caller can
//! register label sets for more locales or override single labels in the config.

use unic_langid::LanguageIdentifier;

/// Localized labels of one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadLabels {
    /// Done key label.
    pub done: String,
    /// Clear key label.
    pub clear: String,
    /// Suffix of the `"<count><symbol>"` length indicator.
    pub length_symbol: String,
}
impl PadLabels {
    /// Neutral labels, used when the locale does not resolve.
    pub fn neutral() -> Self {
        PadLabels {
            done: "Done".to_owned(),
            clear: "Clear".to_owned(),
            length_symbol: " chars".to_owned(),
        }
    }

    /// Korean labels.
    pub fn korean() -> Self {
        PadLabels {
            done: "완료".to_owned(),
            clear: "지우기".to_owned(),
            length_symbol: "자리".to_owned(),
        }
    }
}

/// Resolves keypad labels from a locale tag.
///
/// Resolution is by exact locale match first, then by primary language, then the
/// neutral fallback.
#[derive(Clone, Debug)]
pub struct LabelResolver {
    entries: Vec<(LanguageIdentifier, PadLabels)>,
    fallback: PadLabels,
}
impl Default for LabelResolver {
    /// Resolver with the built-in label sets, neutral fallback.
    fn default() -> Self {
        let mut r = LabelResolver::new(PadLabels::neutral());
        r.insert("ko".parse().unwrap_or_default(), PadLabels::korean());
        r
    }
}
impl LabelResolver {
    /// New empty resolver with the `fallback` labels.
    pub fn new(fallback: PadLabels) -> Self {
        LabelResolver { entries: vec![], fallback }
    }

    /// Registers the labels of a locale, replacing a previous entry for the same locale.
    pub fn insert(&mut self, lang: LanguageIdentifier, labels: PadLabels) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == lang) {
            entry.1 = labels;
        } else {
            self.entries.push((lang, labels));
        }
    }

    /// Labels for the `lang` locale.
    pub fn resolve(&self, lang: &LanguageIdentifier) -> &PadLabels {
        if let Some((_, labels)) = self.entries.iter().find(|(l, _)| l == lang) {
            return labels;
        }
        if let Some((_, labels)) = self.entries.iter().find(|(l, _)| l.language == lang.language) {
            return labels;
        }
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    #[test]
    fn resolves_exact() {
        let r = LabelResolver::default();
        assert_eq!(r.resolve(&lang("ko")).done, "완료");
    }

    #[test]
    fn resolves_primary_language() {
        let r = LabelResolver::default();
        assert_eq!(r.resolve(&lang("ko-KR")).done, "완료");
    }

    #[test]
    fn falls_back_to_neutral() {
        let r = LabelResolver::default();
        assert_eq!(r.resolve(&lang("pt-BR")).done, "Done");
        assert_eq!(r.resolve(&LanguageIdentifier::default()).clear, "Clear");
    }

    #[test]
    fn insert_replaces() {
        let mut r = LabelResolver::default();
        let mut labels = PadLabels::neutral();
        labels.done = "OK".to_owned();
        r.insert(lang("ko"), labels);
        assert_eq!(r.resolve(&lang("ko")).done, "OK");
        assert_eq!(r.resolve(&lang("ko")).clear, "Clear");
    }
}
