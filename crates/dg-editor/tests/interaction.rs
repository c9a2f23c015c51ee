//! Integration tests: interaction controller over tool modes, drags,
//! connections, deletion and inline text editing.

use dg_core::{Color, LineStyle, NodeId, NodeType, Position, ScreenRect, Viewport};
use dg_editor::input::{InputEvent, Modifiers};
use dg_editor::tools::ToolKind;
use dg_editor::{Editor, Outcome};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn place(ed: &mut Editor, tool: ToolKind, x: f32, y: f32) -> NodeId {
    ed.set_tool(tool);
    ed.handle(InputEvent::PaneClick {
        client_x: x,
        client_y: y,
    });
    ed.store().nodes().last().unwrap().id
}

fn connect(ed: &mut Editor, source: NodeId, target: NodeId) -> Outcome {
    ed.handle(InputEvent::Connect { source, target })
}

fn select_nodes(ed: &mut Editor, nodes: &[NodeId]) {
    ed.handle(InputEvent::SelectionChange {
        nodes: nodes.to_vec(),
        edges: vec![],
    });
}

// ─── Shape placement ────────────────────────────────────────────────────

#[test]
fn rectangle_placed_at_click_point() {
    init_logging();
    let mut ed = Editor::default();
    let id = place(&mut ed, ToolKind::Rectangle, 100.0, 100.0);

    let node = ed.store().node(id).unwrap();
    assert_eq!(node.node_type, NodeType::Rectangle);
    assert_eq!((node.width, node.height), (90.0, 60.0));
    assert_eq!(node.position, Position::new(100.0, 100.0));
    assert_eq!(ed.store().tool(), ToolKind::Select);
    assert_eq!(ed.store().history().len(), 2);
}

#[test]
fn placement_projects_through_viewport() {
    let mut ed = Editor::default();
    ed.set_screen(ScreenRect::new(20.0, 10.0, 800.0, 600.0));
    ed.set_viewport(Viewport::new(100.0, 50.0, 2.0));
    let id = place(&mut ed, ToolKind::Circle, 320.0, 260.0);

    let node = ed.store().node(id).unwrap();
    assert_eq!(node.position, Position::new(100.0, 100.0));
    assert_eq!((node.width, node.height), (80.0, 80.0));
}

#[test]
fn label_default_size() {
    let mut ed = Editor::default();
    let id = place(&mut ed, ToolKind::Label, 0.0, 0.0);
    let node = ed.store().node(id).unwrap();
    assert_eq!((node.width, node.height), (80.0, 30.0));
}

// ─── Connections ────────────────────────────────────────────────────────

#[test]
fn connect_uses_default_edge_styling() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    assert_eq!(connect(&mut ed, a, b), Outcome::GRAPH);

    let edge = &ed.store().edges()[0];
    assert_eq!((edge.source, edge.target), (a, b));
    assert_eq!(edge.data.stroke_color, Color::VIOLET);
    assert_eq!(edge.data.stroke_color.to_hex(), "#70f");
    assert_eq!(edge.data.stroke_style, LineStyle::Dashed);
    assert!(edge.data.animated);
    assert!(!edge.data.show_arrow);
    assert!(!edge.data.bidirectional);
}

#[test]
fn self_loops_and_parallel_edges_are_allowed() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    connect(&mut ed, a, a);
    connect(&mut ed, a, b);
    connect(&mut ed, a, b);
    assert_eq!(ed.store().edges().len(), 3);
}

#[test]
fn connect_to_missing_node_is_ignored() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    assert_eq!(
        connect(&mut ed, a, NodeId::intern("ix-missing")),
        Outcome::NONE
    );
    assert!(ed.store().edges().is_empty());
}

#[test]
fn placement_tool_disables_connect_and_select() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    ed.set_tool(ToolKind::Circle);

    assert_eq!(connect(&mut ed, a, b), Outcome::NONE);
    select_nodes(&mut ed, &[a]);
    assert!(ed.store().selected_nodes().is_empty());
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_captures_once_on_release() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let len = ed.store().history().len();

    for x in [5.0, 10.0, 20.0, 40.0] {
        ed.handle(InputEvent::NodeDrag {
            id: a,
            position: Position::new(x, x),
        });
    }
    assert_eq!(ed.store().history().len(), len);
    assert_eq!(ed.store().node(a).unwrap().position, Position::new(40.0, 40.0));

    assert_eq!(ed.handle(InputEvent::NodeDragStop { id: a }), Outcome::GRAPH);
    assert_eq!(ed.store().history().len(), len + 1);

    ed.undo();
    assert_eq!(ed.store().node(a).unwrap().position, Position::new(0.0, 0.0));
}

#[test]
fn drag_without_movement_captures_nothing() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let len = ed.store().history().len();
    ed.handle(InputEvent::NodeDrag {
        id: a,
        position: Position::new(0.0, 0.0),
    });
    assert_eq!(ed.handle(InputEvent::NodeDragStop { id: a }), Outcome::NONE);
    assert_eq!(ed.store().history().len(), len);
}

#[test]
fn unreleased_drag_settles_when_another_node_is_dragged() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    let len = ed.store().history().len();

    ed.handle(InputEvent::NodeDrag {
        id: a,
        position: Position::new(40.0, 40.0),
    });
    // No stop for `a`; `b` is grabbed in place and released.
    assert_eq!(
        ed.handle(InputEvent::NodeDrag {
            id: b,
            position: Position::new(200.0, 0.0),
        }),
        Outcome::GRAPH
    );
    assert_eq!(ed.handle(InputEvent::NodeDragStop { id: b }), Outcome::NONE);

    assert_eq!(ed.store().history().len(), len + 1);
    let newest = ed.store().history().current().unwrap();
    assert_eq!(newest.node(a).unwrap().position, Position::new(40.0, 40.0));

    ed.undo();
    assert_eq!(ed.store().node(a).unwrap().position, Position::new(0.0, 0.0));
    ed.redo();
    assert_eq!(ed.store().node(a).unwrap().position, Position::new(40.0, 40.0));
}

#[test]
fn dragging_a_selected_node_moves_the_whole_selection() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    let c = place(&mut ed, ToolKind::Rectangle, 400.0, 0.0);
    select_nodes(&mut ed, &[a, b]);

    ed.handle(InputEvent::NodeDrag {
        id: a,
        position: Position::new(10.0, 30.0),
    });
    ed.handle(InputEvent::NodeDragStop { id: a });

    assert_eq!(ed.store().node(b).unwrap().position, Position::new(210.0, 30.0));
    assert_eq!(ed.store().node(c).unwrap().position, Position::new(400.0, 0.0));
}

// ─── Delete ─────────────────────────────────────────────────────────────

#[test]
fn delete_selected_node_cascades_and_appends_one_entry() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    let c = place(&mut ed, ToolKind::Rectangle, 400.0, 0.0);
    connect(&mut ed, a, b);
    connect(&mut ed, c, a);
    connect(&mut ed, b, c);
    select_nodes(&mut ed, &[a]);
    let len = ed.store().history().len();

    assert_eq!(
        ed.handle(InputEvent::key("Delete", Modifiers::NONE)),
        Outcome::GRAPH
    );

    assert!(ed.store().node(a).is_none());
    assert_eq!(ed.store().edges().len(), 1);
    assert!(ed.store().edges().iter().all(|e| !e.touches(a)));
    assert!(ed.store().selected_nodes().is_empty());
    assert_eq!(ed.store().history().len(), len + 1);
}

#[test]
fn delete_nodes_and_edges_captures_per_pass() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let b = place(&mut ed, ToolKind::Rectangle, 200.0, 0.0);
    let c = place(&mut ed, ToolKind::Rectangle, 400.0, 0.0);
    connect(&mut ed, a, b);
    connect(&mut ed, b, c);
    let bc = ed.store().edges()[1].id;
    ed.handle(InputEvent::SelectionChange {
        nodes: vec![a],
        edges: vec![bc],
    });
    let len = ed.store().history().len();

    ed.handle(InputEvent::key("Delete", Modifiers::NONE));
    assert!(ed.store().edges().is_empty());
    assert_eq!(ed.store().history().len(), len + 2);
    assert!(ed.store().selected_edges().is_empty());
}

#[test]
fn delete_with_empty_selection_is_noop() {
    let mut ed = Editor::default();
    place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let len = ed.store().history().len();
    assert_eq!(
        ed.handle(InputEvent::key("Delete", Modifiers::NONE)),
        Outcome::NONE
    );
    assert_eq!(ed.store().history().len(), len);
}

#[test]
fn no_dangling_edges_after_any_delete() {
    let mut ed = Editor::default();
    let ids: Vec<NodeId> = (0..5)
        .map(|i| place(&mut ed, ToolKind::Circle, i as f32 * 100.0, 0.0))
        .collect();
    for s in &ids {
        for t in &ids {
            connect(&mut ed, *s, *t);
        }
    }
    for victim in [ids[1], ids[3]] {
        select_nodes(&mut ed, &[victim]);
        ed.handle(InputEvent::key("Delete", Modifiers::NONE));
        assert!(ed.store().snapshot().dangling_edges().is_empty());
    }
    assert_eq!(ed.store().edges().len(), 9);
}

// ─── Inline text editing ────────────────────────────────────────────────

#[test]
fn enter_commits_label_with_history() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let len = ed.store().history().len();

    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });
    ed.handle(InputEvent::TextInput {
        text: "Start".into(),
    });
    assert_eq!(ed.store().node(a).unwrap().label, "");

    assert_eq!(
        ed.handle(InputEvent::key("Enter", Modifiers::NONE)),
        Outcome::GRAPH
    );
    assert_eq!(ed.store().node(a).unwrap().label, "Start");
    assert_eq!(ed.store().history().len(), len + 1);
    assert!(ed.text_edit().is_none());
}

#[test]
fn shift_enter_does_not_commit() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    assert_eq!(ed.handle(InputEvent::key("Enter", shift)), Outcome::NONE);
    assert!(ed.text_edit().is_some());
}

#[test]
fn escape_reverts_without_history() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    let len = ed.store().history().len();

    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });
    ed.handle(InputEvent::TextInput {
        text: "draft".into(),
    });
    ed.handle(InputEvent::key("Escape", Modifiers::NONE));

    assert_eq!(ed.store().node(a).unwrap().label, "");
    assert_eq!(ed.store().history().len(), len);
    assert!(ed.text_edit().is_none());
}

#[test]
fn blur_commits_draft() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Label, 0.0, 0.0);
    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });
    ed.handle(InputEvent::TextInput {
        text: "Decision".into(),
    });
    ed.handle(InputEvent::TextBlur);
    assert_eq!(ed.store().node(a).unwrap().label, "Decision");
}

#[test]
fn shortcuts_suppressed_while_editing_text() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    select_nodes(&mut ed, &[a]);
    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });

    ed.handle(InputEvent::key("Delete", Modifiers::NONE));
    ed.handle(InputEvent::key("z", Modifiers::COMMAND));
    ed.handle(InputEvent::key("c", Modifiers::COMMAND));

    assert!(ed.store().node(a).is_some());
    assert!(ed.store().clipboard().is_none());
    assert!(ed.text_edit().is_some());
}

#[test]
fn pane_click_commits_active_edit() {
    let mut ed = Editor::default();
    let a = place(&mut ed, ToolKind::Rectangle, 0.0, 0.0);
    ed.handle(InputEvent::NodeDoubleClick { id: a, time_ms: 0.0 });
    ed.handle(InputEvent::TextInput { text: "End".into() });
    ed.handle(InputEvent::PaneClick {
        client_x: 500.0,
        client_y: 500.0,
    });
    assert_eq!(ed.store().node(a).unwrap().label, "End");
    assert!(ed.text_edit().is_none());
    assert_eq!(ed.store().nodes().len(), 1);
}
