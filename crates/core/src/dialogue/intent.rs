use crate::config::DialogueConfig;

/// What a button-turn message asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Continue to the next category, or print results when confirming.
    Affirmative,
    /// Add more detail to the current category.
    More,
    /// Contains words from both sets.
    Ambiguous,
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerWords {
    affirmative: Vec<String>,
    more: Vec<String>,
}

impl TriggerWords {
    pub fn new(affirmative: Vec<String>, more: Vec<String>) -> Self {
        let normalize = |words: Vec<String>| {
            words
                .into_iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
        };
        Self { affirmative: normalize(affirmative), more: normalize(more) }
    }

    pub fn from_config(config: &DialogueConfig) -> Self {
        Self::new(config.affirmative_words.clone(), config.more_words.clone())
    }

    /// Case-insensitive substring membership against both word sets.
    pub fn classify(&self, message: &str) -> Intent {
        let lowered = message.to_lowercase();
        let affirmative = self.affirmative.iter().any(|word| lowered.contains(word.as_str()));
        let more = self.more.iter().any(|word| lowered.contains(word.as_str()));

        match (affirmative, more) {
            (true, false) => Intent::Affirmative,
            (false, true) => Intent::More,
            (true, true) => Intent::Ambiguous,
            (false, false) => Intent::Unrecognized,
        }
    }
}

impl Default for TriggerWords {
    fn default() -> Self {
        Self::from_config(&DialogueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, TriggerWords};

    #[test]
    fn classifies_default_trigger_words() {
        let words = TriggerWords::default();

        assert_eq!(words.classify("네"), Intent::Affirmative);
        assert_eq!(words.classify("YES please"), Intent::Affirmative);
        assert_eq!(words.classify("다음으로 가자"), Intent::Affirmative);
        assert_eq!(words.classify("추가하기"), Intent::More);
        assert_eq!(words.classify("네 추가할래"), Intent::Ambiguous);
        assert_eq!(words.classify("음..."), Intent::Unrecognized);
    }

    #[test]
    fn custom_words_are_trimmed_and_lowercased() {
        let words = TriggerWords::new(vec![" OK ".into(), "".into()], vec!["More".into()]);

        assert_eq!(words.classify("ok!"), Intent::Affirmative);
        assert_eq!(words.classify("need MORE"), Intent::More);
        assert_eq!(words.classify(""), Intent::Unrecognized);
    }
}
