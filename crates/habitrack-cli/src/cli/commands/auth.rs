//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context as _, Result};
use habitrack_core::validation::{validate_password, validate_username};

use super::{Context, require};

/// Reads one line from stdin, prompting only when a person is typing.
fn read_secret(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("{prompt}: ");
        io::stdout().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line).context("read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(ctx: &Context, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_secret("Password")?,
    };

    let response = ctx
        .api
        .login(username, &password)
        .await
        .context("Login failed")?;
    let points = ctx.session.store_login(&response)?;

    println!(
        "Logged in as {} ({} points)",
        response.user.username,
        points.points()
    );
    Ok(())
}

pub async fn signup(
    ctx: &Context,
    username: &str,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    validate_username(username)?;
    let password = match password {
        Some(p) => p,
        None => read_secret("Password")?,
    };
    let confirm = match confirm {
        Some(c) => c,
        None if io::stdin().is_terminal() => read_secret("Confirm password")?,
        None => password.clone(),
    };
    validate_password(&password, &confirm)?;

    ctx.api
        .signup(username, &password, &confirm)
        .await
        .context("Sign-up failed")?;

    println!("Account created. Log in with `habitrack login -u {username}`.");
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Prints the user and stores the server's point balance locally.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let user = require(
        ctx.guard.run(ctx.api.fetch_user()).await,
        "Failed to load user",
    )?;

    let mut points = habitrack_core::points::PointStore::load(ctx.storage.as_ref());
    ctx.session.reconcile(&user, &mut points)?;

    println!("{} ({} points)", user.username, points.points());
    Ok(())
}
