//! Integration tests: linear snapshot history through the editor.
//!
//! Covers the round-trip law, no-op boundaries, truncation of the redo
//! branch, and clean-up of selection and popups after a snapshot install.

use dg_core::{EdgeData, GraphSnapshot, NodeType, Position};
use dg_editor::input::{InputEvent, Modifiers};
use dg_editor::popup::PopupOwner;
use dg_editor::tools::ToolKind;
use dg_editor::{Editor, EditorConfig, GraphStore, History, Outcome};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn place(ed: &mut Editor, tool: ToolKind, x: f32, y: f32) {
    ed.set_tool(tool);
    ed.handle(InputEvent::PaneClick {
        client_x: x,
        client_y: y,
    });
}

fn snapshot_with(labels: &[&str]) -> GraphSnapshot {
    let mut store = GraphStore::new(16);
    for (i, label) in labels.iter().enumerate() {
        let id = store.add_node(NodeType::Label, Position::new(i as f32 * 10.0, 0.0));
        store.set_label(id, label);
    }
    store.snapshot()
}

// ─── History manager ────────────────────────────────────────────────────

#[test]
fn capture_after_undo_discards_future() {
    let s0 = snapshot_with(&["a"]);
    let s1 = snapshot_with(&["a", "b"]);
    let s2 = snapshot_with(&["a", "b", "c"]);
    let s3 = snapshot_with(&["d"]);
    let mut history = History::new(16);
    history.capture(&s0);
    history.capture(&s1);
    history.capture(&s2);
    assert_eq!(history.cursor(), 2);

    assert_eq!(history.undo(), Some(s1.clone()));
    assert_eq!(history.undo(), Some(s0.clone()));
    history.capture(&s3);

    assert_eq!(history.entries(), &[s0, s3]);
    assert_eq!(history.cursor(), 1);
    assert!(!history.can_redo());
}

#[test]
fn undo_then_redo_restores_exact_snapshot() {
    init_logging();
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 10.0, 10.0);
    place(&mut ed, ToolKind::Circle, 200.0, 10.0);
    let before = ed.store().snapshot();

    assert_eq!(ed.undo(), Outcome::GRAPH);
    assert_eq!(ed.store().nodes().len(), 1);
    assert_eq!(ed.redo(), Outcome::GRAPH);
    assert_eq!(ed.store().snapshot(), before);
}

#[test]
fn undo_past_start_is_idempotent() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Label, 0.0, 0.0);

    assert_eq!(ed.undo(), Outcome::GRAPH);
    assert!(ed.store().nodes().is_empty());
    for _ in 0..3 {
        assert_eq!(ed.undo(), Outcome::NONE);
    }
    assert_eq!(ed.store().history().cursor(), 0);
    assert_eq!(ed.store().history().len(), 2);
}

#[test]
fn redo_at_newest_entry_is_noop() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Label, 0.0, 0.0);
    let len = ed.store().history().len();
    assert_eq!(ed.redo(), Outcome::NONE);
    assert_eq!(ed.store().history().len(), len);
}

#[test]
fn keyboard_undo_and_both_redo_bindings() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);

    ed.handle(InputEvent::key("z", Modifiers::COMMAND));
    assert!(ed.store().nodes().is_empty());

    let cmd_shift = Modifiers {
        shift: true,
        meta: true,
        ..Modifiers::NONE
    };
    ed.handle(InputEvent::key("Z", cmd_shift));
    assert_eq!(ed.store().nodes().len(), 1);

    ed.handle(InputEvent::key("z", Modifiers::COMMAND));
    ed.handle(InputEvent::key("y", Modifiers::COMMAND));
    assert_eq!(ed.store().nodes().len(), 1);
}

#[test]
fn undo_does_not_capture() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    place(&mut ed, ToolKind::Rectangle, 100.0, 0.0);
    let len = ed.store().history().len();
    ed.undo();
    ed.undo();
    assert_eq!(ed.store().history().len(), len);
}

#[test]
fn history_is_bounded() {
    let config = EditorConfig {
        max_history: 4,
        ..EditorConfig::default()
    };
    let mut ed = Editor::new(config);
    for i in 0..10 {
        place(&mut ed, ToolKind::Label, i as f32 * 20.0, 0.0);
    }
    assert_eq!(ed.store().history().len(), 4);
    assert_eq!(ed.store().history().cursor(), 3);

    while ed.undo() != Outcome::NONE {}
    // The oldest surviving entry holds the 7th placement.
    assert_eq!(ed.store().nodes().len(), 7);
}

#[test]
fn undo_closes_popup_of_vanished_node() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let id = ed.store().nodes()[0].id;
    ed.handle(InputEvent::SelectionChange {
        nodes: vec![id],
        edges: vec![],
    });
    ed.handle(InputEvent::NodeClick { id, time_ms: 0.0 });
    assert!(ed.popups().is_open(PopupOwner::NodeStyle(id)));

    ed.undo();
    assert!(ed.store().nodes().is_empty());
    assert!(ed.store().selected_nodes().is_empty());
    assert!(ed.popups().owner().is_none());
}

#[test]
fn undo_restores_edge_styling() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    let (a, b) = (ed.store().nodes()[0].id, ed.store().nodes()[1].id);
    ed.handle(InputEvent::Connect {
        source: a,
        target: b,
    });
    let edge = ed.store().edges()[0].id;

    ed.handle(InputEvent::Style(dg_core::StyleUpdate::Edge {
        id: edge,
        edit: dg_core::EdgeStyleEdit::ToggleArrow,
    }));
    assert!(ed.store().edge(edge).unwrap().data.show_arrow);

    ed.undo();
    assert_eq!(ed.store().edge(edge).unwrap().data, EdgeData::default());
}
