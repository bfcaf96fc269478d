//! gamelog - a personal gaming journal.
//!
//! Game log posts with media, quick rants, a media gallery, visitor comments
//! and likes, and a Steam "recently played" widget, served as HTML pages and
//! a JSON API.

pub mod cli;
pub mod config;
pub mod content;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
pub mod utils;
