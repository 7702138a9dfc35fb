use habitrack_core::daily::today_string;

use super::Services;
use crate::events::{TodayUiEvent, UiEvent};

pub async fn fetch_user(services: Services) -> UiEvent {
    let result = services.guard.run(services.api.fetch_user()).await;
    UiEvent::Today(TodayUiEvent::UserLoaded(result))
}

/// Loads the track for the current local date.
pub async fn load_today_track(services: Services) -> UiEvent {
    let date = today_string();
    let result = services
        .guard
        .run(services.api.fetch_daily_track(&date))
        .await;
    UiEvent::Today(TodayUiEvent::TrackLoaded(result))
}

pub async fn mark_done(services: Services, date: String, habit_id: String) -> UiEvent {
    let result = services
        .guard
        .run(services.api.mark_done(&date, &habit_id))
        .await
        .map(|_| ());
    UiEvent::Today(TodayUiEvent::MarkDoneFinished { habit_id, result })
}
