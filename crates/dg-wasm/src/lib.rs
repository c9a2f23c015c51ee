//! WASM bridge for DG: exposes the diagram engine to a browser host.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards DOM
//! events as client coordinates; hit testing, popup ownership, history and
//! styling all happen on this side. Methods that may change what is on
//! screen return `true` when the host should redraw, then the host pulls
//! `get_scene()` / `get_ui_state()` as JSON.

use dg_core::{EdgeId, LayoutOrientation, NodeId, Position, ScreenRect, StyleUpdate, Viewport};
use dg_editor::input::{InputEvent, Modifiers, PointerTarget};
use dg_editor::popup::Dropdown;
use dg_editor::tools::ToolKind;
use dg_editor::{Editor, EditorConfig, Outcome};
use dg_render::edge::EdgePathKind;
use dg_render::hit::{Hit, hit_rect, hit_test};
use dg_render::{build_scene, view};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// The main WASM-facing diagram controller.
///
/// Holds the interaction controller and presentation options. All
/// interaction from the host page goes through this struct.
#[wasm_bindgen]
pub struct DiagramCanvas {
    editor: Editor,
    edge_path: EdgePathKind,
}

#[wasm_bindgen]
impl DiagramCanvas {
    /// Create a controller for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        console_error_panic_hook_setup();

        let mut editor = Editor::new(EditorConfig::default());
        editor.set_screen(ScreenRect::new(0.0, 0.0, width, height));
        Self {
            editor,
            edge_path: EdgePathKind::default(),
        }
    }

    /// Replace the editor configuration (JSON, camelCase keys, all
    /// optional). The diagram, clipboard and id counter are kept; history
    /// restarts from the current graph. Returns `false` on malformed JSON.
    pub fn set_config(&mut self, json: &str) -> bool {
        let config: EditorConfig = match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("dg-wasm: bad config: {e}");
                return false;
            }
        };
        self.editor.reconfigure(config);
        true
    }

    /// Canvas element rectangle in client coordinates.
    pub fn resize(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.editor
            .set_screen(ScreenRect::new(left, top, width, height));
    }

    // ─── Modes ───────────────────────────────────────────────────────────

    /// Switch the active tool: `select`, `rectangle`, `circle`, `label`.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(tool) => redraw(self.editor.set_tool(tool)),
            Err(_) => false,
        }
    }

    pub fn get_tool(&self) -> String {
        self.editor.store().tool().name().to_string()
    }

    /// `horizontal` or `vertical`.
    pub fn set_layout(&mut self, name: &str) -> bool {
        match name.parse::<LayoutOrientation>() {
            Ok(layout) => redraw(self.editor.set_layout(layout)),
            Err(_) => false,
        }
    }

    /// `bezier` or `step`.
    pub fn set_edge_path(&mut self, name: &str) -> bool {
        match name.parse::<EdgePathKind>() {
            Ok(kind) if kind != self.edge_path => {
                self.edge_path = kind;
                true
            }
            _ => false,
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Single click at client coordinates: places a shape, opens a popup
    /// for the node or edge under the pointer, or tidies up on empty canvas.
    pub fn click(&mut self, client_x: f32, client_y: f32) -> bool {
        let event = match self.hit(client_x, client_y) {
            Some(Hit::Node(id)) if self.editor.store().tool().shape().is_none() => {
                InputEvent::NodeClick {
                    id,
                    time_ms: now_ms(),
                }
            }
            Some(Hit::Edge(id)) if self.editor.store().tool().shape().is_none() => {
                InputEvent::EdgeClick {
                    id,
                    client_x,
                    client_y,
                    time_ms: now_ms(),
                }
            }
            _ => InputEvent::PaneClick { client_x, client_y },
        };
        redraw(self.editor.handle(event))
    }

    /// Double click: starts inline label editing on the node under the
    /// pointer.
    pub fn double_click(&mut self, client_x: f32, client_y: f32) -> bool {
        match self.hit(client_x, client_y) {
            Some(Hit::Node(id)) => redraw(self.editor.handle(InputEvent::NodeDoubleClick {
                id,
                time_ms: now_ms(),
            })),
            _ => false,
        }
    }

    /// Document-level pointer-down, for click-outside handling.
    /// `in_popup` is set when the event landed inside the open popup.
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, in_popup: bool) -> bool {
        let target = match (in_popup, self.editor.popups().owner()) {
            (true, Some(owner)) => PointerTarget::Popup(owner),
            _ => match self.hit(client_x, client_y) {
                Some(Hit::Node(id)) => PointerTarget::Node(id),
                Some(Hit::Edge(id)) => PointerTarget::Edge(id),
                None => PointerTarget::Pane,
            },
        };
        redraw(self.editor.handle(InputEvent::PointerDown {
            target,
            time_ms: now_ms(),
        }))
    }

    /// Drag frame: `x`, `y` is the dragged node's new canvas position.
    pub fn drag_node(&mut self, id: &str, x: f32, y: f32) -> bool {
        redraw(self.editor.handle(InputEvent::NodeDrag {
            id: NodeId::intern(id),
            position: Position::new(x, y),
        }))
    }

    pub fn drag_stop(&mut self, id: &str) -> bool {
        redraw(self.editor.handle(InputEvent::NodeDragStop {
            id: NodeId::intern(id),
        }))
    }

    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        redraw(self.editor.handle(InputEvent::Connect {
            source: NodeId::intern(source),
            target: NodeId::intern(target),
        }))
    }

    /// Replace the selection from JSON `{"nodes":[...],"edges":[...]}`.
    pub fn set_selection(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Selection>(json) {
            Ok(sel) => redraw(self.editor.handle(InputEvent::SelectionChange {
                nodes: sel.nodes,
                edges: sel.edges,
            })),
            Err(e) => {
                log::warn!("dg-wasm: bad selection: {e}");
                false
            }
        }
    }

    /// Marquee selection: selects every node whose bounds intersect the box
    /// between two client-space corners.
    pub fn marquee_select(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        let (vp, screen) = (self.editor.viewport(), self.editor.screen());
        let (a, b) = (vp.project(screen, x0, y0), vp.project(screen, x1, y1));
        let nodes = hit_rect(self.editor.store().nodes(), a.x, a.y, b.x, b.y);
        redraw(self.editor.handle(InputEvent::SelectionChange {
            nodes,
            edges: Vec::new(),
        }))
    }

    // ─── Keyboard and text ───────────────────────────────────────────────

    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        redraw(self.editor.handle(InputEvent::key(key, modifiers)))
    }

    pub fn text_input(&mut self, text: &str) -> bool {
        redraw(self.editor.handle(InputEvent::TextInput {
            text: text.to_string(),
        }))
    }

    pub fn text_blur(&mut self) -> bool {
        redraw(self.editor.handle(InputEvent::TextBlur))
    }

    // ─── Popups ──────────────────────────────────────────────────────────

    /// Apply a style edit, e.g.
    /// `{"kind":"edge","id":"edge-1","edit":{"field":"toggleArrow"}}`.
    pub fn apply_style(&mut self, json: &str) -> bool {
        match serde_json::from_str::<StyleUpdate>(json) {
            Ok(update) => redraw(self.editor.handle(InputEvent::Style(update))),
            Err(e) => {
                log::warn!("dg-wasm: bad style update: {e}");
                false
            }
        }
    }

    pub fn toggle_dropdown(&mut self, name: &str) -> bool {
        match name.parse::<Dropdown>() {
            Ok(dropdown) => redraw(self.editor.toggle_dropdown(dropdown)),
            Err(_) => false,
        }
    }

    /// The open popup's close button.
    pub fn close_popup(&mut self) -> bool {
        match self.editor.popups().owner() {
            Some(owner) => redraw(self.editor.close_popup(owner)),
            None => false,
        }
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        redraw(self.editor.delete_node(NodeId::intern(id)))
    }

    pub fn delete_edge(&mut self, id: &str) -> bool {
        redraw(self.editor.delete_edge(EdgeId::intern(id)))
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        redraw(self.editor.undo())
    }

    pub fn redo(&mut self) -> bool {
        redraw(self.editor.redo())
    }

    pub fn can_undo(&self) -> bool {
        self.editor.store().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.store().can_redo()
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, x: f32, y: f32, zoom: f32) {
        self.editor.set_viewport(Viewport::new(x, y, zoom));
    }

    /// Viewport as JSON `{"x":..,"y":..,"zoom":..}`.
    pub fn get_viewport(&self) -> String {
        serde_json::to_string(&self.editor.viewport()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn zoom_in(&mut self) {
        let vp = view::zoom_in(self.editor.viewport(), self.editor.screen());
        self.editor.set_viewport(vp);
    }

    pub fn zoom_out(&mut self) {
        let vp = view::zoom_out(self.editor.viewport(), self.editor.screen());
        self.editor.set_viewport(vp);
    }

    pub fn fit_view(&mut self) {
        let vp = view::fit_view(
            self.editor.store().nodes(),
            self.editor.screen(),
            view::FIT_PADDING,
        );
        self.editor.set_viewport(vp);
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Draw list as JSON: `{"edges":[...],"nodes":[...]}`.
    pub fn get_scene(&self) -> String {
        let store = self.editor.store();
        let scene = build_scene(
            &store.snapshot(),
            store.selected_edges(),
            store.layout(),
            self.edge_path,
        );
        serde_json::to_string(&scene).unwrap_or_else(|_| "{}".to_string())
    }

    /// Transient UI state as JSON: tool, layout, open popup, text edit,
    /// selection and undo/redo availability.
    pub fn get_ui_state(&self) -> String {
        serde_json::to_string(&self.ui_state()).unwrap_or_else(|_| "{}".to_string())
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl DiagramCanvas {
    fn hit(&self, client_x: f32, client_y: f32) -> Option<Hit> {
        let p = self
            .editor
            .viewport()
            .project(self.editor.screen(), client_x, client_y);
        let store = self.editor.store();
        hit_test(&store.snapshot(), store.layout(), self.edge_path, p.x, p.y)
    }

    fn ui_state(&self) -> UiState {
        let store = self.editor.store();
        UiState {
            tool: store.tool().name(),
            layout: store.layout().name(),
            popup: self.editor.popups().active().map(|p| PopupState {
                kind: p.owner.kind(),
                target: p.owner.target().to_string(),
                anchor: p.anchor,
                dropdown: p.dropdown.map(Dropdown::name),
            }),
            text_edit: self.editor.text_edit().map(|s| TextEditState {
                node: s.node(),
                draft: s.draft().to_string(),
                original: s.original().to_string(),
            }),
            dragging: self.editor.is_dragging(),
            selection: Selection {
                nodes: store.selected_nodes().to_vec(),
                edges: store.selected_edges().to_vec(),
            },
            can_undo: store.can_undo(),
            can_redo: store.can_redo(),
        }
    }
}

fn redraw(outcome: Outcome) -> bool {
    !outcome.is_none()
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Selection {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

#[derive(Serialize)]
struct PopupState {
    kind: &'static str,
    target: String,
    anchor: Option<(f32, f32)>,
    dropdown: Option<&'static str>,
}

#[derive(Serialize)]
struct TextEditState {
    node: NodeId,
    draft: String,
    original: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState {
    tool: &'static str,
    layout: &'static str,
    popup: Option<PopupState>,
    text_edit: Option<TextEditState>,
    dragging: bool,
    selection: Selection,
    can_undo: bool,
    can_redo: bool,
}

fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("DG WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
