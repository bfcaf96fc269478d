//! Diesel row types.
//!
//! Timestamps and enum tags are stored as text; conversion to the domain
//! types in `crate::models` happens in the repositories.

use diesel::prelude::*;

use crate::schema;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::game_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub game: String,
    pub game_logo: Option<String>,
    pub platform: String,
    pub content: String,
    pub playtime: Option<String>,
    pub rating: Option<i32>,
    pub mood: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::game_posts)]
pub struct NewPostRecord<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub game: &'a str,
    pub game_logo: Option<&'a str>,
    pub platform: &'a str,
    pub content: &'a str,
    pub playtime: Option<&'a str>,
    pub rating: Option<i32>,
    pub mood: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = schema::media_items)]
#[diesel(belongs_to(PostRecord, foreign_key = post_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MediaRecord {
    pub id: String,
    pub post_id: String,
    pub kind: String,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::media_items)]
pub struct NewMediaRecord<'a> {
    pub id: &'a str,
    pub post_id: &'a str,
    pub kind: &'a str,
    pub url: &'a str,
    pub caption: Option<&'a str>,
    pub created_at: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommentRecord {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::comments)]
pub struct NewCommentRecord<'a> {
    pub id: &'a str,
    pub post_id: &'a str,
    pub username: &'a str,
    pub content: &'a str,
    pub created_at: &'a str,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::likes)]
pub struct NewLikeRecord<'a> {
    pub id: &'a str,
    pub post_id: &'a str,
    pub user_agent: &'a str,
    pub ip_address: &'a str,
    pub created_at: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::quick_rants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RantRecord {
    pub id: String,
    pub game: String,
    pub content: String,
    pub mood: String,
    pub created_at: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = schema::quick_rants)]
pub struct NewRantRecord<'a> {
    pub id: &'a str,
    pub game: &'a str,
    pub content: &'a str,
    pub mood: &'a str,
    pub created_at: &'a str,
}
