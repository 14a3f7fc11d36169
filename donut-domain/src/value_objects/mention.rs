// Slack mention value object
//
// Slack escapes user mentions in slash-command text as `<@U123|alice>`.
// The identifier keeps its `<@...>` wrapper so it can be echoed back into
// messages and still render as a mention.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub display_name: String,
}

impl Mention {
    /// Finds the first `<@ID|NAME>` token in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find("<@")?;
        let rest = &text[start + 2..];
        let end = rest.find('>')?;
        let inner = &rest[..end];
        let (raw_id, name) = match inner.split_once('|') {
            Some((id, name)) => (id, name),
            None => (inner, ""),
        };
        let raw_id = raw_id.trim();
        if raw_id.is_empty() || raw_id.contains(char::is_whitespace) {
            return None;
        }
        Some(Self {
            id: format!("<@{}>", raw_id),
            display_name: name.trim().to_string(),
        })
    }

    /// Mention form of a bare Slack user id.
    pub fn tag(user_id: &str) -> String {
        format!("<@{}>", user_id.trim())
    }

    pub fn refers_to(&self, user_id: &str) -> bool {
        self.id == Self::tag(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_and_display_name() {
        let mention = Mention::parse("<@U123|alice> brought some").expect("mention");
        assert_eq!(mention.id, "<@U123>");
        assert_eq!(mention.display_name, "alice");
    }

    #[test]
    fn parses_mention_in_middle_of_text() {
        let mention = Mention::parse("hey <@U9|bob> brought donuts").expect("mention");
        assert_eq!(mention.id, "<@U9>");
        assert_eq!(mention.display_name, "bob");
    }

    #[test]
    fn mention_without_display_name() {
        let mention = Mention::parse("<@U77> brought").expect("mention");
        assert_eq!(mention.id, "<@U77>");
        assert_eq!(mention.display_name, "");
    }

    #[test]
    fn absent_or_unterminated_mention_is_none() {
        assert_eq!(Mention::parse("me"), None);
        assert_eq!(Mention::parse("<@U123|alice brought"), None);
        assert_eq!(Mention::parse("<@|alice>"), None);
    }

    #[test]
    fn refers_to_compares_tagged_ids() {
        let mention = Mention::parse("<@U1|me>").expect("mention");
        assert!(mention.refers_to("U1"));
        assert!(!mention.refers_to("U2"));
    }
}
