// Matches the tables created by DbContext::init_schema.

diesel::table! {
    game_posts (id) {
        id -> Text,
        title -> Text,
        game -> Text,
        game_logo -> Nullable<Text>,
        platform -> Text,
        content -> Text,
        playtime -> Nullable<Text>,
        rating -> Nullable<Integer>,
        mood -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    media_items (id) {
        id -> Text,
        post_id -> Text,
        kind -> Text,
        url -> Text,
        caption -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    comments (id) {
        id -> Text,
        post_id -> Text,
        username -> Text,
        content -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    likes (id) {
        id -> Text,
        post_id -> Text,
        user_agent -> Text,
        ip_address -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    quick_rants (id) {
        id -> Text,
        game -> Text,
        content -> Text,
        mood -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(media_items -> game_posts (post_id));
diesel::joinable!(comments -> game_posts (post_id));
diesel::joinable!(likes -> game_posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(game_posts, media_items, comments, likes, quick_rants,);
