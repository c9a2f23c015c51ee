pub mod clipboard;
pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod popup;
pub mod shortcuts;
pub mod store;
pub mod text_edit;
pub mod tools;

pub use config::EditorConfig;
pub use controller::{Editor, Outcome};
pub use history::History;
pub use store::GraphStore;
