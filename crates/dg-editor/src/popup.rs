//! Popup / focus coordination.
//!
//! At most one contextual editor (node style popup, edge style popup, or
//! inline text editor) is open at any time. Ownership is a single shared
//! slot: opening compare-and-sets it (last requester wins, the previous
//! owner is displaced), and closing only succeeds for the current owner.
//!
//! A pointer-down outside the open editor's own region and outside the
//! shape it was opened from closes it, except within a short grace window
//! after opening so the gesture that opened it cannot immediately close it.

use crate::input::PointerTarget;
use dg_core::{EdgeId, NodeId};
use std::str::FromStr;

/// Who holds the open popup slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupOwner {
    NodeStyle(NodeId),
    EdgeStyle(EdgeId),
    TextEdit(NodeId),
}

impl PopupOwner {
    /// Whether a pointer-down on `target` counts as inside this editor.
    pub fn contains(&self, target: &PointerTarget) -> bool {
        match (self, target) {
            (_, PointerTarget::Popup(owner)) => owner == self,
            (Self::NodeStyle(id) | Self::TextEdit(id), PointerTarget::Node(hit)) => id == hit,
            (Self::EdgeStyle(id), PointerTarget::Edge(hit)) => id == hit,
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeStyle(_) => "nodeStyle",
            Self::EdgeStyle(_) => "edgeStyle",
            Self::TextEdit(_) => "textEdit",
        }
    }

    /// Id of the node or edge the popup belongs to.
    pub fn target(&self) -> &str {
        match self {
            Self::NodeStyle(id) | Self::TextEdit(id) => id.as_str(),
            Self::EdgeStyle(id) => id.as_str(),
        }
    }
}

/// Sub-menus inside a style popup. Only one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    StrokeColor,
    StrokeWidth,
    StrokeStyle,
    BackgroundColor,
    TextColor,
    BorderStyle,
}

impl Dropdown {
    pub fn name(self) -> &'static str {
        match self {
            Self::StrokeColor => "strokeColor",
            Self::StrokeWidth => "strokeWidth",
            Self::StrokeStyle => "strokeStyle",
            Self::BackgroundColor => "backgroundColor",
            Self::TextColor => "textColor",
            Self::BorderStyle => "borderStyle",
        }
    }

    /// Whether this dropdown exists on `owner`'s popup.
    pub fn belongs_to(self, owner: PopupOwner) -> bool {
        match owner {
            PopupOwner::EdgeStyle(_) => matches!(
                self,
                Self::StrokeColor | Self::StrokeWidth | Self::StrokeStyle
            ),
            PopupOwner::NodeStyle(_) => matches!(
                self,
                Self::BackgroundColor | Self::TextColor | Self::BorderStyle
            ),
            PopupOwner::TextEdit(_) => false,
        }
    }
}

impl FromStr for Dropdown {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strokeColor" => Ok(Self::StrokeColor),
            "strokeWidth" => Ok(Self::StrokeWidth),
            "strokeStyle" => Ok(Self::StrokeStyle),
            "backgroundColor" => Ok(Self::BackgroundColor),
            "textColor" => Ok(Self::TextColor),
            "borderStyle" => Ok(Self::BorderStyle),
            other => Err(format!("unknown dropdown: {other:?}")),
        }
    }
}

/// The currently open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePopup {
    pub owner: PopupOwner,
    pub opened_at_ms: f64,
    /// Client-space point the popup was opened at (edge popups).
    pub anchor: Option<(f32, f32)>,
    pub dropdown: Option<Dropdown>,
}

pub struct PopupCoordinator {
    active: Option<ActivePopup>,
    grace_ms: f64,
}

impl PopupCoordinator {
    pub fn new(grace_ms: f64) -> Self {
        Self {
            active: None,
            grace_ms,
        }
    }

    pub fn set_grace_ms(&mut self, grace_ms: f64) {
        self.grace_ms = grace_ms;
    }

    pub fn active(&self) -> Option<&ActivePopup> {
        self.active.as_ref()
    }

    pub fn owner(&self) -> Option<PopupOwner> {
        self.active.as_ref().map(|p| p.owner)
    }

    pub fn is_open(&self, owner: PopupOwner) -> bool {
        self.owner() == Some(owner)
    }

    /// Take the slot for `owner`. Returns the displaced owner, if any.
    ///
    /// Re-requesting by the current owner refreshes the open time and
    /// anchor but keeps its dropdown.
    pub fn request_open(
        &mut self,
        owner: PopupOwner,
        now_ms: f64,
        anchor: Option<(f32, f32)>,
    ) -> Option<PopupOwner> {
        let (displaced, dropdown) = match self.active.take() {
            Some(prev) if prev.owner == owner => (None, prev.dropdown),
            Some(prev) => (Some(prev.owner), None),
            None => (None, None),
        };
        self.active = Some(ActivePopup {
            owner,
            opened_at_ms: now_ms,
            anchor,
            dropdown,
        });
        if let Some(prev) = displaced {
            log::debug!("popup: {owner:?} displaced {prev:?}");
        }
        displaced
    }

    /// Close the slot if `owner` holds it.
    pub fn close(&mut self, owner: PopupOwner) -> bool {
        if self.is_open(owner) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Close whatever is open. Returns the closed owner.
    pub fn close_all(&mut self) -> Option<PopupOwner> {
        self.active.take().map(|p| p.owner)
    }

    /// Close the open popup when `stale` says its owner no longer applies.
    pub fn close_if(&mut self, stale: impl Fn(PopupOwner) -> bool) -> Option<PopupOwner> {
        match self.owner() {
            Some(owner) if stale(owner) => self.close_all(),
            _ => None,
        }
    }

    /// Click-outside handling. Returns the owner that was closed.
    pub fn pointer_down(&mut self, target: &PointerTarget, now_ms: f64) -> Option<PopupOwner> {
        let popup = self.active.as_ref()?;
        if now_ms - popup.opened_at_ms < self.grace_ms || popup.owner.contains(target) {
            return None;
        }
        log::debug!("popup: click outside closes {:?}", popup.owner);
        self.close_all()
    }

    /// Toggle `dropdown` on the open popup, closing any sibling dropdown.
    /// Returns false if no matching popup is open.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) -> bool {
        match self.active.as_mut() {
            Some(popup) if dropdown.belongs_to(popup.owner) => {
                popup.dropdown = if popup.dropdown == Some(dropdown) {
                    None
                } else {
                    Some(dropdown)
                };
                true
            }
            _ => false,
        }
    }

    pub fn close_dropdown(&mut self) {
        if let Some(popup) = self.active.as_mut() {
            popup.dropdown = None;
        }
    }
}
