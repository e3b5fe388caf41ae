//! Content-block page editing session.

use std::fmt;

use chrono::Utc;
use uuid::Uuid;

use gf_core::blocks::{BlockKind, BlockPatch, BlockPayload, ContentBlock};
use gf_core::models::{slugify, ContentPage, PageSave, PageStatus};

/// Handle to a block within one editing session. Ids are assigned from a
/// per-session counter; they are serialized as opaque strings on save and
/// re-assigned on the next load, so they never leak meaning across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

struct EditorBlock {
    id: BlockId,
    payload: BlockPayload,
}

/// One page's editing state. Mutations are all no-op-safe: operations on
/// unknown ids or at list boundaries return false and change nothing.
pub struct PageEditor {
    page_id: Option<Uuid>,
    title: String,
    status: PageStatus,
    blocks: Vec<EditorBlock>,
    next_id: u64,
}

impl PageEditor {
    /// Starts an empty draft for a new page.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            page_id: None,
            title: title.into(),
            status: PageStatus::Draft,
            blocks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds editor state from a stored page, assigning fresh session ids
    /// to every block.
    pub fn load(page: &ContentPage) -> Self {
        let mut editor = Self::new(page.title.clone());
        editor.page_id = Some(page.id);
        editor.status = page.status;
        for block in &page.blocks {
            let id = editor.fresh_id();
            editor.blocks.push(EditorBlock {
                id,
                payload: block.payload.clone(),
            });
        }
        editor
    }

    fn fresh_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    /// The id of the stored page this session edits, if any. A `None` means
    /// saving should create rather than replace.
    pub fn page_id(&self) -> Option<Uuid> {
        self.page_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PageStatus) {
        self.status = status;
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockPayload> {
        self.position(id).map(|index| &self.blocks[index].payload)
    }

    /// Appends an empty block of the given kind and returns its session id.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let id = self.fresh_id();
        self.blocks.push(EditorBlock {
            id,
            payload: BlockPayload::empty(kind),
        });
        id
    }

    /// Merges a partial patch into the block. False when the id is unknown
    /// or the patch targets a different block type.
    pub fn update_block(&mut self, id: BlockId, patch: BlockPatch) -> bool {
        match self.position(id) {
            Some(index) => self.blocks[index].payload.apply(patch),
            None => false,
        }
    }

    /// Removes the block. No confirmation, no undo.
    pub fn delete_block(&mut self, id: BlockId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.blocks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Swaps the block with its neighbor. False at either boundary.
    pub fn move_block(&mut self, id: BlockId, direction: Direction) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < self.blocks.len()).then_some(index + 1),
        };
        let Some(target) = target else {
            return false;
        };
        self.blocks.swap(index, target);
        true
    }

    /// The ordered block list in wire form.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        self.blocks
            .iter()
            .map(|block| ContentBlock {
                id: block.id.to_string(),
                payload: block.payload.clone(),
            })
            .collect()
    }

    /// All blocks rendered in order, with placeholder markup for blocks whose
    /// required fields are still empty.
    pub fn preview_html(&self) -> String {
        self.blocks()
            .iter()
            .map(gf_ui::render_block)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full-page save payload. The server re-derives the slug and stamps
    /// `lastModified` itself; they are included because the wire contract
    /// carries them.
    pub fn save_payload(&self) -> PageSave {
        PageSave {
            title: self.title.clone(),
            slug: slugify(&self.title),
            blocks: self.blocks(),
            is_published: Some(self.status == PageStatus::Published),
            status: Some(self.status),
            last_modified: Some(Utc::now()),
        }
    }
}
