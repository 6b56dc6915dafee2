//! Input normalization
//!
//! Lower-cases, trims and collapses whitespace, and provides a token
//! view with Unicode word boundaries so transliterated text segments
//! correctly.

use unicode_segmentation::UnicodeSegmentation;

/// Normalized view of one user message
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Lowercased, trimmed, whitespace-collapsed text
    pub text: String,
    /// Unicode word tokens of `text`
    pub tokens: Vec<String>,
}

/// Normalize raw user input
pub fn normalize(input: &str) -> Normalized {
    let lowered = input.trim().to_lowercase();
    let text = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    let tokens = text.unicode_words().map(|w| w.to_string()).collect();
    Normalized { text, tokens }
}

/// Light stemming for vocabulary comparisons: strips a plural "s" from
/// tokens of four or more characters
pub fn stem(token: &str) -> &str {
    if token.len() >= 4 && token.ends_with('s') && !token.ends_with("ss") {
        &token[..token.len() - 1]
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_collapse() {
        let n = normalize("  Price   OF   Ghee ");
        assert_eq!(n.text, "price of ghee");
        assert_eq!(n.tokens, vec!["price", "of", "ghee"]);
    }

    #[test]
    fn test_punctuation_tokenization() {
        let n = normalize("what's the price, of coconut-oil?");
        assert!(n.tokens.contains(&"price".to_string()));
        assert!(n.tokens.contains(&"coconut".to_string()));
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem("oils"), "oil");
        assert_eq!(stem("glass"), "glass");
        assert_eq!(stem("is"), "is");
    }
}
