use frontdesk_core::business::BusinessType;
use frontdesk_core::knowledge::{AnswerPayload, TopicAnswer, TopicLabel};

/// Terminal fallback, used even when a response table carries no `fallback`
/// entry of its own. The composer must return *something* for any input.
pub const FALLBACK_PHRASE: &str = "I'm not sure I understood. Could you please repeat that?";

const RESTAURANT_RESPONSES: &[(&str, &str)] = &[
    ("greeting", "Welcome to our restaurant! How can I help you today?"),
    (
        "menu_inquiry",
        "Our menu includes appetizers, main courses, and desserts. What would you like to know more about?",
    ),
    ("order_confirmation", "I've noted your order. Is there anything else you'd like to add?"),
    ("goodbye", "Thank you for your order! We look forward to serving you."),
    ("fallback", FALLBACK_PHRASE),
];

const REAL_ESTATE_RESPONSES: &[(&str, &str)] = &[
    ("greeting", "Welcome to our real estate agency! How can I assist you today?"),
    (
        "property_inquiry",
        "We have several properties available. What type of property are you looking for?",
    ),
    ("viewing_scheduling", "I can help you schedule a viewing. What day and time works for you?"),
    ("goodbye", "Thank you for your interest! We'll be in touch soon."),
    ("fallback", FALLBACK_PHRASE),
];

/// Second-tier keyword table for inputs no topic rule claimed. Ordered;
/// first matching group wins. Keys missing from a business's table degrade
/// to the fallback phrase instead of erroring.
const CANNED_RULES: &[(&[&str], &str)] = &[
    (&["menu", "food", "eat", "order"], "menu_inquiry"),
    (&["property", "house", "apartment", "real estate"], "property_inquiry"),
    (&["bye", "goodbye", "thank you", "thanks"], "goodbye"),
    (&["order", "place", "want", "would like"], "order_confirmation"),
    (&["schedule", "viewing", "appointment", "meet"], "viewing_scheduling"),
];

/// Sub-category cues inside a menu inquiry, with the document key and the
/// display name used in the reply.
const MENU_SECTIONS: &[(&[&str], &str, &str)] = &[
    (&["appetizer"], "appetizers", "appetizers"),
    (&["main", "entree"], "main_courses", "main courses"),
    (&["dessert"], "desserts", "desserts"),
];

/// Canned phrases for one business deployment.
#[derive(Clone, Copy, Debug)]
pub struct ResponseTable {
    entries: &'static [(&'static str, &'static str)],
}

impl ResponseTable {
    pub fn for_business(business_type: BusinessType) -> Self {
        let entries = match business_type {
            BusinessType::Restaurant => RESTAURANT_RESPONSES,
            BusinessType::RealEstate => REAL_ESTATE_RESPONSES,
        };
        Self { entries }
    }

    pub fn phrase(&self, key: &str) -> Option<&'static str> {
        self.entries.iter().find(|(entry_key, _)| *entry_key == key).map(|(_, phrase)| *phrase)
    }

    pub fn greeting(&self) -> &'static str {
        self.phrase("greeting").unwrap_or(FALLBACK_PHRASE)
    }

    pub fn fallback(&self) -> &'static str {
        self.phrase("fallback").unwrap_or(FALLBACK_PHRASE)
    }
}

/// Renders a classified answer into reply text. Total: any payload shape and
/// any input string produce a non-empty reply, the fallback phrase at worst.
pub fn compose(answer: &TopicAnswer, raw_text: &str, responses: &ResponseTable) -> String {
    match answer.label {
        TopicLabel::Menu => compose_menu(&answer.payload, raw_text, responses),
        TopicLabel::Hours => compose_fact(
            &answer.payload,
            |value| format!("We are open {value}."),
            "Our opening hours are not available at the moment.",
        ),
        TopicLabel::Location => compose_fact(
            &answer.payload,
            |value| format!("We are located at {value}."),
            "Our location details are not available at the moment.",
        ),
        TopicLabel::Contact => compose_fact(
            &answer.payload,
            |value| format!("You can reach us at {value}."),
            "Our contact details are not available at the moment.",
        ),
        TopicLabel::Properties => compose_count(
            &answer.payload,
            |count| {
                format!(
                    "We have {count} properties available. What type of property are you looking for?"
                )
            },
            "We don't have any properties available at the moment.",
        ),
        TopicLabel::Agents => compose_count(
            &answer.payload,
            |count| {
                format!(
                    "We have {count} agents available to help you. Would you like to speak with one of them?"
                )
            },
            "We don't have any agents available at the moment.",
        ),
        TopicLabel::Unknown => compose_canned(raw_text, responses),
    }
}

fn compose_menu(payload: &AnswerPayload, raw_text: &str, responses: &ResponseTable) -> String {
    let generic_prompt =
        || responses.phrase("menu_inquiry").unwrap_or(responses.fallback()).to_owned();

    let AnswerPayload::Document(menu) = payload else {
        return generic_prompt();
    };

    let normalized = raw_text.to_lowercase();
    let section = MENU_SECTIONS
        .iter()
        .find(|(cues, _, _)| cues.iter().any(|cue| normalized.contains(cue)));

    let Some((_, document_key, display_name)) = section else {
        return generic_prompt();
    };

    let names: Vec<&str> = menu
        .get(*document_key)
        .and_then(|value| value.as_array())
        .map(|items| items.iter().filter_map(|item| item.get("name")?.as_str()).collect())
        .unwrap_or_default();

    if names.is_empty() {
        return generic_prompt();
    }

    format!(
        "Our {display_name} include: {}. What would you like to know more about?",
        names.join(", ")
    )
}

fn compose_fact(
    payload: &AnswerPayload,
    render: impl Fn(&str) -> String,
    unavailable: &str,
) -> String {
    match payload {
        AnswerPayload::Text(value) => render(value),
        _ => unavailable.to_owned(),
    }
}

fn compose_count(
    payload: &AnswerPayload,
    render: impl Fn(usize) -> String,
    empty: &str,
) -> String {
    match payload {
        AnswerPayload::Items(items) if !items.is_empty() => render(items.len()),
        _ => empty.to_owned(),
    }
}

fn compose_canned(raw_text: &str, responses: &ResponseTable) -> String {
    let normalized = raw_text.to_lowercase();

    CANNED_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .and_then(|(_, key)| responses.phrase(key))
        .unwrap_or(responses.fallback())
        .to_owned()
}
