use super::Services;
use crate::events::{HabitsUiEvent, UiEvent};

pub async fn load_habits(services: Services) -> UiEvent {
    let result = services.guard.run(services.api.fetch_habits()).await;
    UiEvent::Habits(HabitsUiEvent::Loaded(result))
}

pub async fn register_habit(services: Services, name: String) -> UiEvent {
    let result = services
        .guard
        .run(services.api.register_habit(&name))
        .await
        .map(|response| response.id);
    UiEvent::Habits(HabitsUiEvent::Registered { name, result })
}

pub async fn delete_habit(services: Services, id: String) -> UiEvent {
    let result = services
        .guard
        .run(services.api.delete_habit(&id))
        .await
        .map(|_| ());
    UiEvent::Habits(HabitsUiEvent::Deleted { id, result })
}
