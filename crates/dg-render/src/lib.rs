pub mod edge;
pub mod hit;
pub mod node;
pub mod scene;
pub mod view;

pub use edge::{EdgePathKind, EdgeView};
pub use hit::{Hit, hit_rect, hit_test};
pub use node::{Handle, NodeView};
pub use scene::{Scene, build_scene};
