//! Today's track and the habit completion flow.

use std::collections::BTreeSet;

use crate::api::{ApiClient, ApiError, DailyTrack, HabitStatus};
use crate::config::PointsConfig;
use crate::guard::{AuthGuard, Guarded, Route};
use crate::points::PointStore;

pub const ALL_DONE_MESSAGE: &str = "All habits done for today!";
pub const EMPTY_TRACK_MESSAGE: &str = "No habits registered.";

/// Today's date as `YYYY-MM-DD` in local time.
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Why a completion was not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    AlreadyDone,
    InFlight,
    UnknownHabit,
}

/// Points applied after a successful completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub points: i64,
    /// True when this completion finished the day.
    pub all_done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Done(Award),
    Rejected(Rejected),
    AuthFailed { redirect: Route },
    Failed(ApiError),
}

/// A loaded daily track plus the completions currently in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodayTrack {
    track: DailyTrack,
    in_flight: BTreeSet<String>,
}

impl TodayTrack {
    pub fn new(track: DailyTrack) -> Self {
        Self {
            track,
            in_flight: BTreeSet::new(),
        }
    }

    pub fn date(&self) -> &str {
        &self.track.date
    }

    pub fn statuses(&self) -> &[HabitStatus] {
        &self.track.habit_statuses
    }

    pub fn is_empty(&self) -> bool {
        self.track.habit_statuses.is_empty()
    }

    pub fn is_in_flight(&self, habit_id: &str) -> bool {
        self.in_flight.contains(habit_id)
    }

    pub fn remaining(&self) -> usize {
        self.track
            .habit_statuses
            .iter()
            .filter(|s| !s.is_done)
            .count()
    }

    pub fn all_done(&self) -> bool {
        !self.is_empty() && self.remaining() == 0
    }

    /// Marks a completion as in flight if it may be submitted.
    ///
    /// # Errors
    /// Returns why the habit cannot be submitted; nothing changes then.
    pub fn begin(&mut self, habit_id: &str) -> Result<(), Rejected> {
        let status = self
            .track
            .habit_statuses
            .iter()
            .find(|s| s.habit_id == habit_id)
            .ok_or(Rejected::UnknownHabit)?;
        if status.is_done {
            return Err(Rejected::AlreadyDone);
        }
        if !self.in_flight.insert(habit_id.to_string()) {
            return Err(Rejected::InFlight);
        }
        Ok(())
    }

    /// Records a successful completion and awards points.
    ///
    /// Returns `None` if the habit was already marked done, so a late
    /// duplicate response never awards twice.
    pub fn succeed(
        &mut self,
        habit_id: &str,
        points: &mut PointStore,
        rules: &PointsConfig,
    ) -> Option<Award> {
        self.in_flight.remove(habit_id);
        let status = self
            .track
            .habit_statuses
            .iter_mut()
            .find(|s| s.habit_id == habit_id)?;
        if status.is_done {
            return None;
        }
        status.is_done = true;

        let all_done = self.remaining() == 0;
        let awarded = points.award(rules, all_done);
        Some(Award {
            points: awarded,
            all_done,
        })
    }

    /// Releases an in-flight completion after a failure.
    pub fn fail(&mut self, habit_id: &str) {
        self.in_flight.remove(habit_id);
    }

    /// Carries completions still in flight over from a track being replaced.
    ///
    /// Carried habits stay undone locally until their own response arrives,
    /// even if the reload already reports them done, so the award is applied
    /// exactly once. Nothing carries over across a date change.
    pub fn adopt_in_flight(&mut self, previous: &TodayTrack) {
        if previous.date() != self.date() {
            return;
        }
        for habit_id in &previous.in_flight {
            if let Some(status) = self
                .track
                .habit_statuses
                .iter_mut()
                .find(|s| &s.habit_id == habit_id)
            {
                status.is_done = false;
                self.in_flight.insert(habit_id.clone());
            }
        }
    }
}

/// Runs the whole completion flow for one habit.
///
/// The caller persists `points` and raises the all-done alert.
pub async fn complete_habit(
    api: &ApiClient,
    guard: &AuthGuard,
    track: &mut TodayTrack,
    points: &mut PointStore,
    rules: &PointsConfig,
    habit_id: &str,
) -> Completion {
    if let Err(rejected) = track.begin(habit_id) {
        tracing::debug!(habit_id, ?rejected, "completion not submitted");
        return Completion::Rejected(rejected);
    }

    let date = if track.date().is_empty() {
        today_string()
    } else {
        track.date().to_string()
    };

    match guard.run(api.mark_done(&date, habit_id)).await {
        Guarded::Ok(_) => match track.succeed(habit_id, points, rules) {
            Some(award) => Completion::Done(award),
            None => Completion::Rejected(Rejected::AlreadyDone),
        },
        Guarded::AuthFailed { redirect } => {
            track.fail(habit_id);
            Completion::AuthFailed { redirect }
        }
        Guarded::Failed(err) => {
            track.fail(habit_id);
            Completion::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    fn status(id: &str, name: &str, done: bool) -> HabitStatus {
        HabitStatus {
            habit_id: id.to_string(),
            habit_name: name.to_string(),
            is_done: done,
        }
    }

    fn track(statuses: Vec<HabitStatus>) -> TodayTrack {
        TodayTrack::new(DailyTrack {
            id: "t".into(),
            user_id: "u".into(),
            date: "2025-05-01".into(),
            habit_statuses: statuses,
        })
    }

    #[test]
    fn test_today_string_format() {
        let today = today_string();
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_begin_rejects_done_and_in_flight() {
        let mut t = track(vec![status("1", "Read", true), status("2", "Run", false)]);
        assert_eq!(t.begin("1"), Err(Rejected::AlreadyDone));
        assert_eq!(t.begin("2"), Ok(()));
        assert_eq!(t.begin("2"), Err(Rejected::InFlight));
        assert_eq!(t.begin("9"), Err(Rejected::UnknownHabit));
        t.fail("2");
        assert_eq!(t.begin("2"), Ok(()));
    }

    #[test]
    fn test_last_habit_awards_bonus_once() {
        let rules = PointsConfig::default();
        let mut points = PointStore::new(0);
        let mut t = track(vec![status("1", "Read", false), status("2", "Run", false)]);

        t.begin("1").unwrap();
        let first = t.succeed("1", &mut points, &rules).unwrap();
        assert!(!first.all_done);
        assert_eq!(first.points, 3);

        t.begin("2").unwrap();
        let second = t.succeed("2", &mut points, &rules).unwrap();
        assert!(second.all_done);
        assert_eq!(second.points, 8);

        assert!(t.succeed("2", &mut points, &rules).is_none());
        assert_eq!(points.points(), 11);
        assert!(t.all_done());
    }

    #[test]
    fn test_reload_keeps_in_flight_completion() {
        let rules = PointsConfig::default();
        let mut points = PointStore::new(0);
        let mut old = track(vec![status("1", "Read", false), status("2", "Run", true)]);
        old.begin("1").unwrap();

        // The server already recorded the completion when the reload ran.
        let mut reloaded = track(vec![status("1", "Read", true), status("2", "Run", true)]);
        reloaded.adopt_in_flight(&old);
        assert!(reloaded.is_in_flight("1"));
        assert_eq!(reloaded.begin("1"), Err(Rejected::InFlight));

        let award = reloaded.succeed("1", &mut points, &rules).unwrap();
        assert!(award.all_done);
        assert_eq!(points.points(), 8);
        assert!(reloaded.succeed("1", &mut points, &rules).is_none());
    }

    #[test]
    fn test_in_flight_not_carried_to_another_day() {
        let mut old = track(vec![status("1", "Read", false)]);
        old.begin("1").unwrap();

        let mut next_day = TodayTrack::new(DailyTrack {
            date: "2025-05-02".into(),
            habit_statuses: vec![status("1", "Read", false)],
            ..DailyTrack::default()
        });
        next_day.adopt_in_flight(&old);
        assert!(!next_day.is_in_flight("1"));
        assert_eq!(next_day.begin("1"), Ok(()));
    }

    #[tokio::test]
    async fn test_completing_twice_awards_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/daily_track/done"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_token("tok"));
        let api = ApiClient::new(server.uri(), Arc::clone(&storage));
        let guard = AuthGuard::new(storage);
        let rules = PointsConfig::default();
        let mut points = PointStore::new(0);
        let mut t = track(vec![status("1", "Read", false)]);

        let first = complete_habit(&api, &guard, &mut t, &mut points, &rules, "1").await;
        assert_eq!(
            first,
            Completion::Done(Award {
                points: 8,
                all_done: true
            })
        );

        let second = complete_habit(&api, &guard, &mut t, &mut points, &rules, "1").await;
        assert_eq!(second, Completion::Rejected(Rejected::AlreadyDone));
        assert_eq!(points.points(), 8);
    }

    #[tokio::test]
    async fn test_failed_completion_leaves_habit_undone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/daily_track/done"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "nope"})))
            .mount(&server)
            .await;

        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_token("tok"));
        let api = ApiClient::new(server.uri(), Arc::clone(&storage));
        let guard = AuthGuard::new(storage);
        let mut points = PointStore::new(5);
        let mut t = track(vec![status("1", "Read", false)]);

        let out = complete_habit(
            &api,
            &guard,
            &mut t,
            &mut points,
            &PointsConfig::default(),
            "1",
        )
        .await;
        assert!(matches!(out, Completion::Failed(_)));
        assert_eq!(points.points(), 5);
        assert_eq!(t.remaining(), 1);
        assert!(!t.is_in_flight("1"));
    }
}
