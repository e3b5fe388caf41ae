//! # gf-ui
//!
//! Read-only HTML rendering of content pages: one renderer per block type,
//! assembled into full documents by the askama templates. Every user-supplied
//! string is escaped here; templates only interpolate pre-rendered block HTML.

use askama::Template;
use html_escape::{encode_double_quoted_attribute, encode_safe};

use gf_core::blocks::{video_embed_url, BlockPayload, ContentBlock};
use gf_core::models::ContentPage;

/// Public page view.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub blocks: &'a [String],
}

/// Editor preview: the same body with a status banner on top.
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate<'a> {
    pub title: &'a str,
    pub status: &'a str,
    pub blocks: &'a [String],
}

pub fn render_page(page: &ContentPage) -> askama::Result<String> {
    let blocks: Vec<String> = page.blocks.iter().map(render_block).collect();
    PageTemplate {
        title: &page.title,
        blocks: &blocks,
    }
    .render()
}

pub fn render_preview(page: &ContentPage) -> askama::Result<String> {
    let blocks: Vec<String> = page.blocks.iter().map(render_block).collect();
    PreviewTemplate {
        title: &page.title,
        status: page.status.as_str(),
        blocks: &blocks,
    }
    .render()
}

/// HTML for a single block. Blocks whose required URL is still empty render
/// placeholder markup instead of a broken element.
pub fn render_block(block: &ContentBlock) -> String {
    match &block.payload {
        BlockPayload::Title { title } => {
            format!("<h1 class=\"block-heading\">{}</h1>", encode_safe(title))
        }
        BlockPayload::Text { body } => {
            let escaped = encode_safe(body).replace('\n', "<br />");
            format!("<p class=\"block-text\">{escaped}</p>")
        }
        BlockPayload::Image { url, alt } => {
            if url.is_empty() {
                placeholder("No image selected")
            } else {
                format!(
                    "<img class=\"block-image\" src=\"{}\" alt=\"{}\" />",
                    encode_double_quoted_attribute(url),
                    encode_double_quoted_attribute(alt)
                )
            }
        }
        BlockPayload::Video { url, title } => {
            if url.is_empty() {
                placeholder("No video selected")
            } else if let Some(embed) = video_embed_url(url) {
                format!(
                    "<iframe class=\"block-video\" src=\"{}\" title=\"{}\" allowfullscreen></iframe>",
                    encode_double_quoted_attribute(&embed),
                    encode_double_quoted_attribute(title)
                )
            } else {
                format!(
                    "<video class=\"block-video\" controls src=\"{}\"></video>",
                    encode_double_quoted_attribute(url)
                )
            }
        }
        BlockPayload::Attachment { url, name, size } => {
            if url.is_empty() {
                placeholder("No file attached")
            } else {
                let label = if name.is_empty() { "Download" } else { name };
                format!(
                    "<a class=\"block-attachment\" href=\"{}\" download>{} ({})</a>",
                    encode_double_quoted_attribute(url),
                    encode_safe(label),
                    format_size(*size)
                )
            }
        }
    }
}

fn placeholder(text: &str) -> String {
    format!("<div class=\"block-placeholder\">{}</div>", encode_safe(text))
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::models::PageStatus;
    use uuid::Uuid;

    fn block(payload: BlockPayload) -> ContentBlock {
        ContentBlock {
            id: "1".into(),
            payload,
        }
    }

    #[test]
    fn streaming_urls_render_as_embeds() {
        let html = render_block(&block(BlockPayload::Video {
            url: "https://www.youtube.com/watch?v=abc123".into(),
            title: "Icebreaker".into(),
        }));
        assert!(html.contains("<iframe"));
        assert!(html.contains("https://www.youtube.com/embed/abc123"));
        assert!(html.contains("title=\"Icebreaker\""));
    }

    #[test]
    fn direct_urls_render_as_native_video() {
        let html = render_block(&block(BlockPayload::Video {
            url: "https://example.org/talk.mp4".into(),
            title: String::new(),
        }));
        assert!(html.contains("<video"));
        assert!(html.contains("controls"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn empty_urls_render_placeholders() {
        for payload in [
            BlockPayload::Video {
                url: String::new(),
                title: String::new(),
            },
            BlockPayload::Image {
                url: String::new(),
                alt: String::new(),
            },
            BlockPayload::Attachment {
                url: String::new(),
                name: String::new(),
                size: 0,
            },
        ] {
            let html = render_block(&block(payload));
            assert!(html.contains("block-placeholder"), "{html}");
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_block(&block(BlockPayload::Title {
            title: "<script>alert(1)</script>".into(),
        }));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn attachment_shows_name_and_human_size() {
        let html = render_block(&block(BlockPayload::Attachment {
            url: "/static/uploads/ab/cd/abcd.pdf".into(),
            name: "minutes.pdf".into(),
            size: 2048,
        }));
        assert!(html.contains("minutes.pdf"));
        assert!(html.contains("2.0 KB"));
    }

    #[test]
    fn size_formatting_breaks_at_binary_boundaries() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn page_renders_blocks_in_order_with_title() {
        let page = ContentPage {
            id: Uuid::now_v7(),
            title: "About Us".into(),
            slug: "about-us".into(),
            blocks: vec![
                block(BlockPayload::Title {
                    title: "Welcome".into(),
                }),
                block(BlockPayload::Text {
                    body: "We meet fortnightly.".into(),
                }),
            ],
            status: PageStatus::Published,
            is_published: true,
            last_modified: chrono::Utc::now(),
        };

        let html = render_page(&page).unwrap();
        assert!(html.contains("<title>About Us | GavelFlow</title>"));
        let welcome = html.find("Welcome").unwrap();
        let body = html.find("We meet fortnightly.").unwrap();
        assert!(welcome < body);

        let preview = render_preview(&page).unwrap();
        assert!(preview.contains("published"));
    }
}
