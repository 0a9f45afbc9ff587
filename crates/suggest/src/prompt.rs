//! Chat prompts sent to the completion endpoint.

use itertools::Itertools;
use serde::Serialize;

/// System and user messages for one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Ask for a subtopic given a rendered neighbourhood context.
    pub fn contextual(context: &str) -> Self {
        Self {
            system: "You are a helpful assistant that suggests relevant subtopics for mind maps. \
                     Keep suggestions concise (max 5 words) and relevant to the context."
                .to_string(),
            user: format!("Based on this mind map context, suggest a relevant subtopic:\n\n{context}"),
        }
    }

    /// Ask for a subtopic of `target` given every label in the map.
    pub fn topic_list<'a>(labels: impl IntoIterator<Item = &'a str>, target: &str) -> Self {
        let topics = labels.into_iter().join(", ");
        Self {
            system: "You are a helpful assistant that suggests relevant subtopics for mind maps. \
                     Keep suggestions concise and relevant."
                .to_string(),
            user: format!(
                "Given a mind map with topics: {topics}, suggest a relevant subtopic for the \
                 parent topic \"{target}\". Respond with just the subtopic text, no explanations."
            ),
        }
    }

    pub(crate) fn messages(&self) -> [ChatMessage<'_>; 2] {
        [
            ChatMessage {
                role: "system",
                content: &self.system,
            },
            ChatMessage {
                role: "user",
                content: &self.user,
            },
        ]
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}
