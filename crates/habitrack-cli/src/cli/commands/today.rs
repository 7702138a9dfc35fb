//! Today's track and the completion flow.

use anyhow::Result;
use habitrack_core::daily::{
    ALL_DONE_MESSAGE, Completion, EMPTY_TRACK_MESSAGE, Rejected, TodayTrack, complete_habit,
    today_string,
};
use habitrack_core::guard::SESSION_EXPIRED_MESSAGE;
use habitrack_core::points::PointStore;

use super::{Context, require};

async fn load_track(ctx: &Context) -> Result<TodayTrack> {
    let date = today_string();
    let track = require(
        ctx.guard.run(ctx.api.fetch_daily_track(&date)).await,
        "Failed to load today's habits",
    )?;
    Ok(TodayTrack::new(track))
}

pub async fn show(ctx: &Context) -> Result<()> {
    let track = load_track(ctx).await?;
    let points = PointStore::load(ctx.storage.as_ref());

    println!("{}", track.date());
    if track.is_empty() {
        println!("{EMPTY_TRACK_MESSAGE}");
    }
    for status in track.statuses() {
        let mark = if status.is_done { "x" } else { " " };
        println!("[{mark}] {:>6}  {}", status.habit_id, status.habit_name);
    }
    println!("{} remaining · {} points", track.remaining(), points.points());
    Ok(())
}

pub async fn done(ctx: &Context, habit_id: &str) -> Result<()> {
    let mut track = load_track(ctx).await?;
    let mut points = PointStore::load(ctx.storage.as_ref());

    match complete_habit(
        &ctx.api,
        &ctx.guard,
        &mut track,
        &mut points,
        &ctx.config.points,
        habit_id,
    )
    .await
    {
        Completion::Done(award) => {
            points.save(ctx.storage.as_ref())?;
            println!("+{} points ({} total)", award.points, points.points());
            if award.all_done {
                println!("{ALL_DONE_MESSAGE}");
            }
            Ok(())
        }
        Completion::Rejected(Rejected::AlreadyDone) => {
            println!("Habit {habit_id} is already done today.");
            Ok(())
        }
        Completion::Rejected(Rejected::InFlight) => {
            anyhow::bail!("Habit {habit_id} is already being completed")
        }
        Completion::Rejected(Rejected::UnknownHabit) => {
            anyhow::bail!("Habit {habit_id} is not on today's track")
        }
        Completion::AuthFailed { .. } => anyhow::bail!(SESSION_EXPIRED_MESSAGE),
        Completion::Failed(err) => {
            Err(anyhow::Error::new(err).context("Failed to mark habit done"))
        }
    }
}
