//! Today screen state.

use habitrack_core::api::HabitStatus;
use habitrack_core::daily::TodayTrack;

#[derive(Debug, Clone, Default)]
pub struct TodayState {
    pub track: Option<TodayTrack>,
    pub selected: usize,
    pub loading: bool,
}

impl TodayState {
    pub fn statuses(&self) -> &[HabitStatus] {
        self.track.as_ref().map_or(&[][..], TodayTrack::statuses)
    }

    pub fn selected_status(&self) -> Option<&HabitStatus> {
        self.statuses().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.statuses().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replaces the track, keeping the selection in range and any
    /// completions still in flight.
    pub fn set_track(&mut self, mut track: TodayTrack) {
        if let Some(previous) = &self.track {
            track.adopt_in_flight(previous);
        }
        let len = track.statuses().len();
        self.track = Some(track);
        self.selected = self.selected.min(len.saturating_sub(1));
        self.loading = false;
    }
}
