//! Habits feature slice: list, register and delete habits.

mod render;
mod state;
mod update;

pub use render::render_habits;
pub use state::HabitsState;
pub use update::{handle_event, handle_key};
