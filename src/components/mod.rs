pub mod canvas;
pub mod chat;
pub mod config_panel;
pub mod context;
pub mod palette;
pub mod toolbar;
