//! Canned advisory replies for when the chat model cannot be reached

/// Keyword to reply table. Matching walks this slice in order and stops at the
/// first keyword found, so a question mentioning both "cost" and "timing"
/// always gets the "cost" reply.
pub const FALLBACK_RESPONSES: [(&str, &str); 5] = [
    (
        "where",
        "You can purchase agricultural inputs from your nearest Krishi Vigyan Kendra (KVK), \
         agricultural cooperative society, or licensed pesticide dealers. Contact your local \
         agricultural extension officer for specific suppliers in your area.",
    ),
    (
        "cost",
        "Treatment costs vary by region and product. Contact your local KVK or agricultural \
         department for current prices and any available subsidies for farmers.",
    ),
    (
        "timing",
        "Apply treatments early morning or late evening when temperatures are cooler. Avoid \
         spraying during rain or strong winds. Follow the product label instructions carefully.",
    ),
    (
        "mixing",
        "Never mix different chemicals without expert guidance. Some combinations can be \
         dangerous or ineffective. Consult your local agricultural officer before combining any \
         treatments.",
    ),
    (
        "organic",
        "Organic alternatives include neem oil, copper-based fungicides, and bio-pesticides. \
         These are often available at organic farming stores or can be prepared at home with \
         guidance from agricultural extension services.",
    ),
];

/// Reply when no keyword matches
pub const GENERIC_FALLBACK: &str = "For specific questions about your situation, please consult \
    your nearest Krishi Vigyan Kendra (KVK) or agricultural extension officer. They can provide \
    personalized guidance based on local conditions.";

/// Pick a canned reply for a farmer's question.
///
/// Matching is a case-insensitive substring search over [`FALLBACK_RESPONSES`].
pub fn offline_fallback(question: &str) -> &'static str {
    let question = question.to_lowercase();

    FALLBACK_RESPONSES
        .iter()
        .find(|(keyword, _)| question.contains(keyword))
        .map(|(_, response)| *response)
        .unwrap_or(GENERIC_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_order() {
        let keywords: Vec<&str> = FALLBACK_RESPONSES.iter().map(|(k, _)| *k).collect();
        assert_eq!(keywords, ["where", "cost", "timing", "mixing", "organic"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(offline_fallback("ORGANIC options?"), FALLBACK_RESPONSES[4].1);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(offline_fallback("Is it going to rain?"), GENERIC_FALLBACK);
        assert_eq!(offline_fallback(""), GENERIC_FALLBACK);
    }
}
