//! Habit command handlers.

use anyhow::Result;
use habitrack_core::habits::{
    DELETE_FAILED_MESSAGE, HabitList, LOAD_FAILED_MESSAGE, MAX_HABITS, REGISTER_FAILED_MESSAGE,
};
use habitrack_core::validation::validate_habit_name;

use super::{Context, require};

async fn load(ctx: &Context) -> Result<HabitList> {
    let habits = require(
        ctx.guard.run(ctx.api.fetch_habits()).await,
        LOAD_FAILED_MESSAGE,
    )?;
    Ok(HabitList::new(habits))
}

pub async fn list(ctx: &Context) -> Result<()> {
    let list = load(ctx).await?;
    if list.is_empty() {
        println!("No habits registered.");
        return Ok(());
    }

    for habit in list.habits() {
        println!("{:>6}  {}", habit.id, habit.name);
    }
    println!("{}/{MAX_HABITS} habits", list.len());
    Ok(())
}

/// Validates the name locally and refuses once the cap is reached.
pub async fn add(ctx: &Context, name: &str) -> Result<()> {
    let name = validate_habit_name(name)?;
    let list = load(ctx).await?;
    if !list.can_add() {
        anyhow::bail!("You can register up to {MAX_HABITS} habits");
    }

    let response = require(
        ctx.guard.run(ctx.api.register_habit(name)).await,
        REGISTER_FAILED_MESSAGE,
    )?;
    println!("Registered \"{name}\" (id {})", response.id);
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    require(
        ctx.guard.run(ctx.api.delete_habit(id)).await,
        DELETE_FAILED_MESSAGE,
    )?;
    println!("Deleted habit {id}");
    Ok(())
}
