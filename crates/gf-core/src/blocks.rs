//! # Content Blocks
//!
//! One discrete, typed unit of page content. The payload is a tagged union:
//! a block can only ever carry the fields of its own type, so stale fields
//! from a previous type cannot leak through an edit (the classic bug in
//! flat `{title?, body?, url?, ...}` representations).
//!
//! Wire shape: `{"id": "...", "type": "video", "content": {"url": ..., "title": ...}}`.

use serde::{Deserialize, Serialize};

/// The five block types a page editor can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Title,
    Text,
    Image,
    Video,
    Attachment,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Attachment => "attachment",
        }
    }
}

/// Per-type block content. Field names are part of the wire contract
/// (a title block's heading text travels under the `title` key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockPayload {
    Title {
        #[serde(default)]
        title: String,
    },
    Text {
        #[serde(default)]
        body: String,
    },
    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        alt: String,
    },
    Video {
        #[serde(default)]
        url: String,
        #[serde(default)]
        title: String,
    },
    Attachment {
        #[serde(default)]
        url: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        size: u64,
    },
}

impl BlockPayload {
    /// The empty payload a freshly added block of `kind` starts with.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Title => Self::Title { title: String::new() },
            BlockKind::Text => Self::Text { body: String::new() },
            BlockKind::Image => Self::Image {
                url: String::new(),
                alt: String::new(),
            },
            BlockKind::Video => Self::Video {
                url: String::new(),
                title: String::new(),
            },
            BlockKind::Attachment => Self::Attachment {
                url: String::new(),
                name: String::new(),
                size: 0,
            },
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Title { .. } => BlockKind::Title,
            Self::Text { .. } => BlockKind::Text,
            Self::Image { .. } => BlockKind::Image,
            Self::Video { .. } => BlockKind::Video,
            Self::Attachment { .. } => BlockKind::Attachment,
        }
    }

    /// True when every field still holds its empty default.
    pub fn is_empty(&self) -> bool {
        self == &Self::empty(self.kind())
    }

    /// Merges a partial patch into this payload. Fields absent from the
    /// patch are preserved. Returns false (and changes nothing) when the
    /// patch targets a different block type.
    pub fn apply(&mut self, patch: BlockPatch) -> bool {
        match (self, patch) {
            (Self::Title { title }, BlockPatch::Title { title: new_title }) => {
                if let Some(t) = new_title {
                    *title = t;
                }
                true
            }
            (Self::Text { body }, BlockPatch::Text { body: new_body }) => {
                if let Some(b) = new_body {
                    *body = b;
                }
                true
            }
            (
                Self::Image { url, alt },
                BlockPatch::Image {
                    url: new_url,
                    alt: new_alt,
                },
            ) => {
                if let Some(u) = new_url {
                    *url = u;
                }
                if let Some(a) = new_alt {
                    *alt = a;
                }
                true
            }
            (
                Self::Video { url, title },
                BlockPatch::Video {
                    url: new_url,
                    title: new_title,
                },
            ) => {
                if let Some(u) = new_url {
                    *url = u;
                }
                if let Some(t) = new_title {
                    *title = t;
                }
                true
            }
            (
                Self::Attachment { url, name, size },
                BlockPatch::Attachment {
                    url: new_url,
                    name: new_name,
                    size: new_size,
                },
            ) => {
                if let Some(u) = new_url {
                    *url = u;
                }
                if let Some(n) = new_name {
                    *name = n;
                }
                if let Some(s) = new_size {
                    *size = s;
                }
                true
            }
            _ => false,
        }
    }
}

/// Partial content for `update block`: same variants as [`BlockPayload`]
/// with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockPatch {
    Title {
        title: Option<String>,
    },
    Text {
        body: Option<String>,
    },
    Image {
        url: Option<String>,
        alt: Option<String>,
    },
    Video {
        url: Option<String>,
        title: Option<String>,
    },
    Attachment {
        url: Option<String>,
        name: Option<String>,
        size: Option<u64>,
    },
}

/// A block as persisted inside a page. The id is opaque and client-generated;
/// it orders nothing, keys nothing relationally, and only lets an editor
/// session point at a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }
}

/// Hosts whose video URLs render as embeds rather than a native player.
const STREAMING_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

pub fn is_streaming_url(url: &str) -> bool {
    STREAMING_HOSTS.iter().any(|host| url.contains(host))
}

/// Rewrites a streaming URL into its embeddable form (`watch?v=` becomes
/// `embed/`); returns None for non-streaming URLs, which render as a native
/// `<video>` element instead.
pub fn video_embed_url(url: &str) -> Option<String> {
    is_streaming_url(url).then(|| url.replace("watch?v=", "embed/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_serializes_with_adjacent_type_and_content() {
        let block = ContentBlock {
            id: "3".into(),
            payload: BlockPayload::Video {
                url: "https://www.youtube.com/watch?v=abc".into(),
                title: "Icebreaker".into(),
            },
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "3",
                "type": "video",
                "content": {"url": "https://www.youtube.com/watch?v=abc", "title": "Icebreaker"}
            })
        );
    }

    #[test]
    fn block_deserializes_with_missing_content_fields() {
        let block: ContentBlock = serde_json::from_value(json!({
            "id": "1",
            "type": "attachment",
            "content": {"url": "/static/uploads/ab/cd/abcd"}
        }))
        .unwrap();
        assert_eq!(
            block.payload,
            BlockPayload::Attachment {
                url: "/static/uploads/ab/cd/abcd".into(),
                name: String::new(),
                size: 0,
            }
        );
    }

    #[test]
    fn empty_payloads_report_empty() {
        for kind in [
            BlockKind::Title,
            BlockKind::Text,
            BlockKind::Image,
            BlockKind::Video,
            BlockKind::Attachment,
        ] {
            let payload = BlockPayload::empty(kind);
            assert_eq!(payload.kind(), kind);
            assert!(payload.is_empty());
        }
    }

    #[test]
    fn apply_merges_and_preserves_absent_fields() {
        let mut payload = BlockPayload::Image {
            url: "/img/old.png".into(),
            alt: "old alt".into(),
        };
        let changed = payload.apply(BlockPatch::Image {
            url: Some("/img/new.png".into()),
            alt: None,
        });
        assert!(changed);
        assert_eq!(
            payload,
            BlockPayload::Image {
                url: "/img/new.png".into(),
                alt: "old alt".into(),
            }
        );
    }

    #[test]
    fn apply_rejects_mismatched_block_type() {
        let mut payload = BlockPayload::Title { title: "Welcome".into() };
        let changed = payload.apply(BlockPatch::Text { body: Some("x".into()) });
        assert!(!changed);
        assert_eq!(payload, BlockPayload::Title { title: "Welcome".into() });
    }

    #[test]
    fn youtube_watch_urls_become_embed_urls() {
        assert_eq!(
            video_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        // Short links carry no watch?v= segment; the rewrite passes them through.
        assert_eq!(
            video_embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://youtu.be/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn non_streaming_urls_do_not_embed() {
        assert_eq!(video_embed_url("https://example.org/talk.mp4"), None);
        assert!(!is_streaming_url(""));
    }
}
