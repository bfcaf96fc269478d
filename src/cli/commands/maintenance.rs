//! Maintenance commands.

use console::style;

use crate::config::Settings;
use crate::services::MediaLibrary;

/// Reclassify every stored media item, same as `PATCH /api/posts?action=fix-media-types`.
pub async fn cmd_reclassify(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let fixed = MediaLibrary::new(ctx).reclassify_all().await?;
    println!("{} Fixed {} media items", style("✓").green(), fixed);
    Ok(())
}
