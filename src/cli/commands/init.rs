//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    let tables = ctx.list_tables().await?;
    println!(
        "  {} Database ready ({} tables)",
        style("✓").green(),
        tables.len()
    );

    if settings.admin_password_hash.is_none() {
        println!(
            "{} No admin password configured; admin login is disabled",
            style("!").yellow()
        );
        println!("  Run `gamelog hash-password` and set admin_password_hash in gamelog.toml");
    }
    if !settings.steam.is_configured() {
        println!(
            "{} No Steam API key configured; the Steam widget is hidden",
            style("!").yellow()
        );
    }

    println!(
        "{} Initialized gamelog in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}
