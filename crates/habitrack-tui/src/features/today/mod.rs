//! Today feature slice: today's track and the completion flow.

mod render;
mod state;
mod update;

pub use render::render_today;
pub use state::TodayState;
pub use update::{
    ALREADY_DONE_MESSAGE, LOAD_FAILED_MESSAGE, MARK_FAILED_MESSAGE, handle_event, handle_key,
};
