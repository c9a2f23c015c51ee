pub mod color;
pub mod id;
pub mod model;
pub mod style;
pub mod viewport;

pub use color::Color;
pub use id::{EdgeId, IdGen, NodeId};
pub use model::*;
pub use style::{EdgeStyleEdit, NodeStyleEdit, StyleUpdate};
pub use viewport::{ScreenRect, Viewport};
