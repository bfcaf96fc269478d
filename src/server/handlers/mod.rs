//! HTTP request handlers for the web server.

mod comments;
mod helpers;
mod likes;
mod media;
mod pages;
mod posts;
mod preview;
mod rants;
mod session;
mod static_files;
mod stats;
mod steam;

// Re-export handlers for use by the router
pub use comments::{create_comment, delete_comment, list_comments};
pub use likes::{get_likes, toggle_like};
pub use media::{delete_media, list_media, upload_media};
pub use pages::{game_detail, gallery, games, home, not_found};
pub use posts::{create_post, delete_post, get_post, list_posts, patch_posts};
pub use preview::preview_content;
pub use rants::{create_rant, delete_rant, list_rants};
pub use session::{login, logout};
pub use static_files::serve_css;
pub use stats::{api_stats, health};
pub use steam::steam_proxy;
