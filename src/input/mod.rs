mod handler;
mod keymap;

pub use handler::{Command, Focus};
pub use keymap::handle_key_event;
