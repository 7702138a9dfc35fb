//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Log in and store the session.
    Login { username: String, password: String },

    /// Create an account.
    SignUp {
        username: String,
        password: String,
        confirmation: String,
    },

    /// Clear the stored session.
    Logout,

    /// Fetch the user to reconcile the point balance.
    FetchUser,

    /// Load today's track.
    LoadTodayTrack,

    /// Mark one habit of the loaded track done.
    MarkDone { date: String, habit_id: String },

    /// Write the point balance to client storage.
    PersistPoints { points: i64 },

    LoadHabits,

    RegisterHabit { name: String },

    DeleteHabit { id: String },
}
