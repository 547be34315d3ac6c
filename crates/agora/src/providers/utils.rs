use serde_json::{json, Value};

use crate::models::content::MessageContent;
use crate::models::message::Message;

/// Convert internal messages to the chat-completions wire format.
///
/// A single-part text message is sent with its content as a plain string;
/// anything multi-part becomes an array of typed parts, text ahead of
/// image references, preserving internal part order.
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    let mut messages_spec = Vec::new();

    for message in messages {
        let content = match message.content.as_slice() {
            [MessageContent::Text(text)] => json!(text.text),
            parts => Value::Array(
                parts
                    .iter()
                    .map(|part| match part {
                        MessageContent::Text(text) => json!({
                            "type": "text",
                            "text": text.text,
                        }),
                        MessageContent::Image(image) => json!({
                            "type": "image_url",
                            "image_url": { "url": image.url },
                        }),
                    })
                    .collect(),
            ),
        };

        messages_spec.push(json!({
            "role": message.role,
            "content": content,
        }));
    }

    messages_spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_text_message_is_a_plain_string() {
        let messages = vec![Message::system().with_text("You are ResumeAI.")];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[0]["content"], "You are ResumeAI.");
    }

    #[test]
    fn multi_part_message_becomes_typed_parts() {
        let messages = vec![Message::user()
            .with_text("Review this")
            .with_image("https://cdn.example/resume.png")];
        let spec = messages_to_openai_spec(&messages);

        let content = spec[0]["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "Review this");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "https://cdn.example/resume.png"
        );
    }

    #[test]
    fn message_order_is_preserved() {
        let messages = vec![
            Message::system().with_text("system first"),
            Message::user().with_text("user second"),
        ];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[1]["role"], "user");
    }
}
