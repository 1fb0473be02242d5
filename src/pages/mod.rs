pub mod deploy;
pub mod editor;
pub mod not_found;
