//! Minimal TwiML rendering. The documents the telephony webhooks expect are
//! small and fixed-shape, so they are rendered directly rather than through
//! a template engine.

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `<Response><Message>…</Message></Response>` for SMS replies.
pub fn message_response(text: &str) -> String {
    format!("{XML_HEADER}<Response><Message>{}</Message></Response>", escape(text))
}

/// `<Response><Say>…</Say>[<Gather …/>]</Response>` for voice replies. The
/// gather action carries the session key so the next utterance lands on the
/// same conversation.
pub fn voice_response(say: &str, gather_action: Option<&str>) -> String {
    let mut body = format!("<Say>{}</Say>", escape(say));
    if let Some(action) = gather_action {
        body.push_str(&format!(
            "<Gather input=\"speech\" action=\"{}\" method=\"POST\" language=\"en-US\" speechTimeout=\"auto\"/>",
            escape(action)
        ));
    }
    format!("{XML_HEADER}<Response>{body}</Response>")
}

#[cfg(test)]
mod tests {
    use super::{escape, message_response, voice_response};

    #[test]
    fn escapes_xml_metacharacters() {
        assert_eq!(escape("fish & chips <today>"), "fish &amp; chips &lt;today&gt;");
        assert_eq!(escape("it's \"fine\""), "it&apos;s &quot;fine&quot;");
    }

    #[test]
    fn message_response_wraps_reply() {
        let twiml = message_response("We are open Monday-Sunday: 11am-10pm.");
        assert!(twiml.starts_with("<?xml"));
        assert!(twiml.contains("<Message>We are open Monday-Sunday: 11am-10pm.</Message>"));
    }

    #[test]
    fn voice_response_includes_gather_when_continuing() {
        let twiml = voice_response("Hello!", Some("/api/v1/voice/handle-input?session_id=abc"));
        assert!(twiml.contains("<Say>Hello!</Say>"));
        assert!(twiml.contains("action=\"/api/v1/voice/handle-input?session_id=abc\""));
        assert!(twiml.contains("input=\"speech\""));
    }

    #[test]
    fn voice_response_without_gather_just_says() {
        let twiml = voice_response("Goodbye.", None);
        assert!(twiml.contains("<Say>Goodbye.</Say>"));
        assert!(!twiml.contains("<Gather"));
    }
}
