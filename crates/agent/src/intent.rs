use frontdesk_core::knowledge::TopicLabel;

/// Ordered keyword rules. First matching group wins, which fixes a
/// deterministic precedence for inputs that would satisfy several groups
/// ("where can I eat" classifies as menu, not location).
const RULES: &[(&[&str], TopicLabel)] = &[
    (&["menu", "food", "eat"], TopicLabel::Menu),
    (&["hours", "open", "close"], TopicLabel::Hours),
    (&["location", "address", "where"], TopicLabel::Location),
    (&["contact", "phone", "call"], TopicLabel::Contact),
    (&["property", "house", "apartment"], TopicLabel::Properties),
    (&["agent", "realtor", "broker"], TopicLabel::Agents),
];

/// Maps free text to a topic. Matching is plain substring containment on the
/// lower-cased input, without word-boundary checks: "eat" matches inside
/// "eaten". Total: anything unmatched is `Unknown`.
pub fn classify(text: &str) -> TopicLabel {
    let normalized = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(_, label)| *label)
        .unwrap_or(TopicLabel::Unknown)
}

#[cfg(test)]
mod tests {
    use frontdesk_core::knowledge::TopicLabel;

    use super::classify;

    #[test]
    fn routes_each_keyword_group() {
        let cases = [
            ("What's on the menu?", TopicLabel::Menu),
            ("anything good to eat?", TopicLabel::Menu),
            ("What are your hours?", TopicLabel::Hours),
            ("when do you close", TopicLabel::Hours),
            ("what's your address", TopicLabel::Location),
            ("how do I contact you", TopicLabel::Contact),
            ("can I call someone", TopicLabel::Contact),
            ("looking for a house", TopicLabel::Properties),
            ("any apartment available", TopicLabel::Properties),
            ("I want to speak with a realtor", TopicLabel::Agents),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "misrouted: {text}");
        }
    }

    #[test]
    fn earlier_rules_take_precedence() {
        // "where" belongs to location, "eat" to menu; menu is tested first.
        assert_eq!(classify("where can I eat around here"), TopicLabel::Menu);
        // "open house" carries both an hours and a properties token.
        assert_eq!(classify("is the open house still on"), TopicLabel::Hours);
    }

    #[test]
    fn matching_ignores_word_boundaries() {
        assert_eq!(classify("I have eaten already"), TopicLabel::Menu);
        assert_eq!(classify("the doors were opened"), TopicLabel::Hours);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("SHOW ME THE MENU"), TopicLabel::Menu);
    }

    #[test]
    fn unmatched_and_degenerate_inputs_are_unknown() {
        assert_eq!(classify(""), TopicLabel::Unknown);
        assert_eq!(classify("   "), TopicLabel::Unknown);
        assert_eq!(classify("¿qué tal? 你好"), TopicLabel::Unknown);
        assert_eq!(classify("tell me a joke"), TopicLabel::Unknown);
    }
}
