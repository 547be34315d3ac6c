use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // One matched label/target pair, non-greedy, no nested brackets.
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
}

/// One line of generated text, decomposed into renderable segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayBlock {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text { text: String },
    Link { label: String, target: String },
}

impl Segment {
    fn text(text: &str) -> Self {
        Segment::Text {
            text: text.to_string(),
        }
    }
}

/// Split raw generated text into display blocks, one per line, resolving
/// `[label](target)` spans into link segments. Pure and idempotent; any
/// partial or unmatched link syntax stays literal plain text.
pub fn render_blocks(raw: &str) -> Vec<DisplayBlock> {
    raw.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> DisplayBlock {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in LINK_RE.captures_iter(line) {
        let span = captures.get(0).unwrap();
        if span.start() > cursor {
            segments.push(Segment::text(&line[cursor..span.start()]));
        }
        segments.push(Segment::Link {
            label: captures[1].to_string(),
            target: captures[2].to_string(),
        });
        cursor = span.end();
    }

    if cursor < line.len() || segments.is_empty() {
        segments.push(Segment::text(&line[cursor..]));
    }

    DisplayBlock { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_with_link_splits_into_three_segments() {
        let blocks = render_blocks("See [View ResumeAI →](/agent/1) now.");

        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].segments,
            vec![
                Segment::text("See "),
                Segment::Link {
                    label: "View ResumeAI →".to_string(),
                    target: "/agent/1".to_string(),
                },
                Segment::text(" now."),
            ]
        );
    }

    #[test]
    fn line_without_links_is_one_plain_segment() {
        let blocks = render_blocks("Just a plain recommendation.");
        assert_eq!(
            blocks[0].segments,
            vec![Segment::text("Just a plain recommendation.")]
        );
    }

    #[test]
    fn each_line_becomes_one_block() {
        let blocks = render_blocks("first\nsecond\n\nfourth");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[2].segments, vec![Segment::text("")]);
    }

    #[test]
    fn partial_syntax_stays_literal() {
        let blocks = render_blocks("broken [label](no-close and [alone] brackets");
        assert_eq!(
            blocks[0].segments,
            vec![Segment::text(
                "broken [label](no-close and [alone] brackets"
            )]
        );
    }

    #[test]
    fn multiple_links_keep_interstitial_text() {
        let blocks =
            render_blocks("Try [View A →](/agent/1) or [View B →](/agent/2) today");
        assert_eq!(blocks[0].segments.len(), 4);
        assert_eq!(blocks[0].segments[0], Segment::text("Try "));
        assert_eq!(blocks[0].segments[2], Segment::text(" or "));
    }

    #[test]
    fn rendering_is_idempotent() {
        let raw = "Line one with [View X →](/agent/3)\nline two";
        assert_eq!(render_blocks(raw), render_blocks(raw));
    }

    #[test]
    fn segments_serialize_with_kind_tags() {
        let blocks = render_blocks("[View A →](/agent/1)");
        let value = serde_json::to_value(&blocks).unwrap();
        assert_eq!(value[0]["segments"][0]["kind"], "link");
        assert_eq!(value[0]["segments"][0]["target"], "/agent/1");
    }
}
