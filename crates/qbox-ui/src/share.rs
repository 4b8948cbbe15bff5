//! Share Text
//!
//! Derived, formatted strings for clipboard and external-share use,
//! produced on demand from the current question and answer.

use qbox_dom::url::{encode_component, path_for_question};

/// Answer text alone
pub fn answer_only(answer: &str) -> String {
    answer.trim().to_string()
}

/// Question and answer as one copyable block
pub fn question_and_answer(question: &str, answer: &str) -> String {
    format!("Q: {}\n\nA: {}", question.trim(), answer.trim())
}

/// Shareable URL for a question
pub fn share_url(origin: &str, question: &str) -> String {
    format!(
        "{}{}",
        origin.trim_end_matches('/'),
        path_for_question(question)
    )
}

/// Tweet body: the question plus its share link
pub fn tweet_text(question: &str, share_url: &str) -> String {
    format!("{}\n{}", question.trim(), share_url)
}

/// Twitter intent URL carrying a prefilled tweet
pub fn tweet_intent_url(text: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}",
        encode_component(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_and_answer_format() {
        assert_eq!(
            question_and_answer(" why? ", "because "),
            "Q: why?\n\nA: because"
        );
    }

    #[test]
    fn test_share_url_encoding() {
        let url = share_url("https://example.com/", "what is rust");
        assert_eq!(url, "https://example.com/%2Fwhat%2520is%2520rust");
    }

    #[test]
    fn test_tweet_intent() {
        let url = tweet_intent_url("why?\nhttps://example.com/x");
        assert!(url.starts_with("https://twitter.com/intent/tweet?text=why"));
        assert!(url.contains("%0A"));
        assert!(!url.contains('\n'));
    }
}
