pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
