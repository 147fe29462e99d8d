// Banned keyword policy - decides whether a message text is objectionable.
//
// Matching is deliberately dumb: case-insensitive substring search over a
// fixed list. "condition" matches inside "airconditioning" and that is
// accepted behavior, not a bug. Anything smarter (word boundaries, fuzzy
// matching, classifiers) is out of scope.

/// Keywords that get a new user removed.
///
/// Treated as build-time data; curation happens here, not at runtime.
pub const BANNED_KEYWORDS: &[&str] = &[
    "spam",
    "scam",
    "bitcoin",
    "crypto",
    "onlyfans",
    // TODO: ask the list owner whether this is one phrase or a missing
    // separator between "condition" and "health". Kept verbatim until then.
    "conditionhealth",
];

/// Case-insensitive substring filter over a fixed keyword list.
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter from an explicit keyword list.
    ///
    /// Entries are lowered once up front; duplicates and oddities in the
    /// input are kept as-is, each entry is matched literally.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Filter over the built-in `BANNED_KEYWORDS` list.
    pub fn default_list() -> Self {
        Self::new(BANNED_KEYWORDS)
    }

    /// Does the text contain any banned keyword as a substring?
    ///
    /// Empty text never matches.
    pub fn contains_banned(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.keywords.iter().any(|keyword| lower.contains(keyword))
    }

    /// Number of configured keywords (shown on the status page).
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::default_list()
    }
}

// ============================================================================
// TESTS
// ============================================================================
