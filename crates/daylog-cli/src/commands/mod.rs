//! Command handlers.

pub mod day;
pub mod init;
pub mod misc;
pub mod settings;

pub use day::{
    handle_add, handle_delete, handle_done, handle_edit, handle_migrate, handle_reflect,
    handle_undo, handle_view,
};
pub use init::handle_init;
pub use misc::{handle_check, handle_completions, handle_inspire};
pub use settings::handle_settings;
