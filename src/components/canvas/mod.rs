mod adapter;
mod component;
mod render;
mod state;

pub use adapter::{DragPayload, KeyAction, key_action};
pub use component::ArchitectureCanvas;
