//! Inline label editing.
//!
//! A session holds the draft text for one node. Enter (without Shift) or
//! focus loss commits the draft; Escape discards it and the node keeps its
//! last committed label.

use dg_core::NodeId;

/// How a key press inside the text editor is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Commit,
    Cancel,
    /// Ordinary editing key; left to the text field.
    PassThrough,
}

impl TextKey {
    pub fn classify(key: &str, shift: bool) -> Self {
        match key {
            "Enter" if !shift => Self::Commit,
            "Escape" => Self::Cancel,
            _ => Self::PassThrough,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSession {
    node: NodeId,
    draft: String,
    original: String,
}

impl TextEditSession {
    pub fn begin(node: NodeId, label: &str) -> Self {
        Self {
            node,
            draft: label.to_string(),
            original: label.to_string(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Label the node had when editing began.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keys() {
        assert_eq!(TextKey::classify("Enter", false), TextKey::Commit);
        assert_eq!(TextKey::classify("Enter", true), TextKey::PassThrough);
        assert_eq!(TextKey::classify("Escape", false), TextKey::Cancel);
        assert_eq!(TextKey::classify("Delete", false), TextKey::PassThrough);
        assert_eq!(TextKey::classify("c", false), TextKey::PassThrough);
    }

    #[test]
    fn draft_tracks_changes() {
        let mut session = TextEditSession::begin(NodeId::intern("t"), "Start");
        assert!(!session.is_dirty());
        session.set_draft("Stop");
        assert!(session.is_dirty());
        assert_eq!(session.original(), "Start");
        assert_eq!(session.draft(), "Stop");
    }
}
