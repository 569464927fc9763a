//! Keyword highlighting for step instructions.
//!
//! Instead of injecting markup into instruction text, the text is split into
//! segments and each segment carries an `emphasized` flag. Renderers decide how
//! emphasis looks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Cooking verbs and cues that are emphasized in step text.
pub const COOKING_KEYWORDS: &[&str] = &[
    "bake", "beat", "blend", "boil", "braise", "broil", "chop", "combine", "cool", "dice", "drain",
    "fold", "fry", "grate", "grill", "heat", "knead", "marinate", "mince", "mix", "peel", "poach",
    "preheat", "reduce", "rest", "roast", "saute", "sauté", "season", "sear", "serve", "simmer",
    "slice", "steam", "stir", "strain", "toss", "whisk",
];

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = COOKING_KEYWORDS
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    // Simple inflections (boiled, chops, whisking) are matched by the optional suffix.
    Regex::new(&format!(r"(?i)\b(?:{alternation})(?:s|es|ed|d|ing)?\b"))
        .expect("keyword pattern is valid")
});

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)(?:\s*(?:-|to)\s*\d+)?\s*(hours?|hrs?|minutes?|mins?)\b")
        .expect("duration pattern is valid")
});

/// A run of step text with a single emphasis state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    pub text: String,
    pub emphasized: bool,
}

impl TextSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: false,
        }
    }

    fn emphasized(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: true,
        }
    }
}

/// Splits `text` into plain and emphasized segments.
///
/// Concatenating the returned segments always yields the input unchanged.
/// Empty input produces no segments.
pub fn highlight_keywords(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in KEYWORD_PATTERN.find_iter(text) {
        if found.start() > cursor {
            segments.push(TextSegment::plain(&text[cursor..found.start()]));
        }
        segments.push(TextSegment::emphasized(found.as_str()));
        cursor = found.end();
    }

    if cursor < text.len() {
        segments.push(TextSegment::plain(&text[cursor..]));
    }

    segments
}

/// Extracts the first duration mentioned in `text`, in minutes.
///
/// Ranges such as "10-12 minutes" resolve to their lower bound.
pub fn suggest_timer_minutes(text: &str) -> Option<u32> {
    let captures = DURATION_PATTERN.captures(text)?;
    let amount: u32 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_lowercase();

    let minutes = if unit.starts_with('h') {
        amount.checked_mul(60)?
    } else {
        amount
    };

    (minutes > 0).then_some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[TextSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_keywords_are_emphasized() {
        let text = "Boil the pasta, then drain and serve.";
        let segments = highlight_keywords(text);

        let emphasized: Vec<&str> = segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(emphasized, vec!["Boil", "drain", "serve"]);
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn test_inflections_and_word_boundaries() {
        let segments = highlight_keywords("Keep whisking; the mixture is well mixed. Boiler off.");
        let emphasized: Vec<&str> = segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text.as_str())
            .collect();
        // "mixture" and "Boiler" are not keywords
        assert_eq!(emphasized, vec!["whisking", "mixed"]);
    }

    #[test]
    fn test_markup_like_text_passes_through_untouched() {
        let text = "<b>stir</b> & <script>";
        let segments = highlight_keywords(text);
        assert_eq!(joined(&segments), text);
        assert!(segments.iter().any(|s| s.emphasized && s.text == "stir"));
    }

    #[test]
    fn test_empty_text() {
        assert!(highlight_keywords("").is_empty());
    }

    #[test]
    fn test_suggest_timer_minutes() {
        assert_eq!(suggest_timer_minutes("Simmer for 10 minutes."), Some(10));
        assert_eq!(suggest_timer_minutes("Bake 25-30 min until golden"), Some(25));
        assert_eq!(suggest_timer_minutes("Rest for 2 hours"), Some(120));
        assert_eq!(suggest_timer_minutes("Season to taste"), None);
        assert_eq!(suggest_timer_minutes("Wait 0 minutes"), None);
    }
}
