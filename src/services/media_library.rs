//! Media library workflow.
//!
//! Standalone uploads need an owning post, so each one gets a generated
//! "media post". Deleting the last item of such a post removes the post too.

use tracing::{debug, info};

use crate::content::{classify, MediaDescriptor};
use crate::models::{GalleryItem, GamePost, MediaUpload, Mood, NewGamePost, NewMediaItem};
use crate::repository::{DbContext, StoreError, StoreResult};

/// Outcome of a standalone media upload.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub item: GalleryItem,
    /// Set when classification overrode the uploader's selection.
    pub reclassified: bool,
}

/// Outcome of deleting one media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaDeletion {
    /// The owning standalone media post was removed along with the item.
    pub removed_post: bool,
}

#[derive(Clone)]
pub struct MediaLibrary {
    db: DbContext,
}

impl MediaLibrary {
    pub fn new(db: DbContext) -> Self {
        Self { db }
    }

    /// Store an uploaded media URL under a new standalone media post.
    pub async fn upload(&self, upload: &MediaUpload) -> StoreResult<UploadedMedia> {
        let declared = upload.validate()?;
        let descriptor = MediaDescriptor::classify(upload.url.trim(), declared);
        let caption = upload.caption.trim();

        let mut created = self
            .db
            .posts()
            .create(&NewGamePost {
                title: format!("{} {}", GamePost::MEDIA_TITLE_PREFIX, caption),
                game: upload.game.trim().to_string(),
                game_logo: None,
                platform: "Various".to_string(),
                content: format!("{} {}", GamePost::MEDIA_CONTENT_PREFIX, caption),
                playtime: None,
                rating: None,
                mood: Mood::Satisfied.as_str().to_string(),
                media_items: vec![NewMediaItem {
                    kind: Some(declared.as_str().to_string()),
                    url: descriptor.url.clone(),
                    caption: Some(caption.to_string()),
                }],
            })
            .await?;

        let item = created.media_items.pop().ok_or(StoreError::NotFound)?;
        info!(
            "Uploaded {} media {} for {}",
            item.kind, item.id, created.post.game
        );

        Ok(UploadedMedia {
            item: GalleryItem::new(item, created.post.game),
            reclassified: descriptor.was_reclassified(),
        })
    }

    /// Delete a media item, cleaning up its standalone media post if emptied.
    pub async fn delete(&self, id: &str) -> StoreResult<MediaDeletion> {
        let media = self.db.media();
        let item = media.get(id).await?.ok_or(StoreError::NotFound)?;

        if !media.delete(id).await? {
            return Err(StoreError::NotFound);
        }

        let remaining = media.count_for_post(&item.post_id).await?;
        let removed_post = match self.db.posts().get(&item.post_id).await? {
            Some(post) if remaining == 0 && post.is_standalone_media() => {
                debug!("Removing empty media post {}", post.id);
                self.db.posts().delete(&post.id).await?
            }
            _ => false,
        };

        Ok(MediaDeletion { removed_post })
    }

    /// Run every stored media row through the classifier, fixing stale kinds.
    ///
    /// Returns the number of rows updated. Running it twice updates nothing
    /// the second time.
    pub async fn reclassify_all(&self) -> StoreResult<usize> {
        let media = self.db.media();
        let mut fixed = 0;

        for item in media.list_all().await? {
            let kind = classify(&item.url, item.kind);
            if kind != item.kind {
                debug!("Media {}: {} -> {}", item.id, item.kind, kind);
                if media.update_kind(&item.id, kind).await? {
                    fixed += 1;
                }
            }
        }

        info!("Reclassified {} media items", fixed);
        Ok(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MediaKind;
    use crate::repository::test_context;

    fn upload(url: &str, kind: &str) -> MediaUpload {
        MediaUpload {
            url: url.to_string(),
            caption: "clutch".to_string(),
            game: "Rocket League".to_string(),
            kind: kind.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_creates_media_post() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let uploaded = library
            .upload(&upload("https://youtu.be/abc123", "screenshot"))
            .await
            .unwrap();
        assert!(uploaded.reclassified);
        assert_eq!(uploaded.item.kind, MediaKind::YouTube);
        assert_eq!(uploaded.item.caption, "clutch");

        let post = ctx.posts().get(&uploaded.item.post_id).await.unwrap().unwrap();
        assert_eq!(post.title, "Media: clutch");
        assert_eq!(post.content, "Media uploaded: clutch");
        assert_eq!(post.platform, "Various");
        assert_eq!(post.mood, Mood::Satisfied);
        assert!(post.is_standalone_media());
    }

    #[tokio::test]
    async fn test_upload_writes_one_post_and_one_item() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let uploaded = library
            .upload(&upload("https://example.com/boost.mp4", "screenshot"))
            .await
            .unwrap();
        assert_eq!(ctx.posts().count().await.unwrap(), 1);

        let stored = ctx
            .posts()
            .get_with_media(&uploaded.item.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.media_items.len(), 1);
        assert_eq!(stored.media_items[0].id, uploaded.item.id);
        assert_eq!(stored.media_items[0].kind, MediaKind::Video);
        assert_eq!(stored.media_items[0].caption.as_deref(), Some("clutch"));
    }

    #[tokio::test]
    async fn test_upload_requires_fields() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let err = library
            .upload(&upload("https://example.com/a.png", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(_)));
        assert_eq!(ctx.posts().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_last_item_removes_media_post() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let uploaded = library
            .upload(&upload("https://example.com/a.png", "screenshot"))
            .await
            .unwrap();
        let deletion = library.delete(&uploaded.item.id).await.unwrap();
        assert!(deletion.removed_post);
        assert!(ctx.posts().get(&uploaded.item.post_id).await.unwrap().is_none());

        assert!(matches!(
            library.delete(&uploaded.item.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_keeps_regular_post() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let post = ctx
            .posts()
            .create(&NewGamePost {
                title: "Ranked grind".to_string(),
                game: "Rocket League".to_string(),
                game_logo: None,
                platform: "PC".to_string(),
                content: "diamond at last".to_string(),
                playtime: None,
                rating: None,
                mood: "excited".to_string(),
                media_items: vec![NewMediaItem {
                    kind: None,
                    url: "https://example.com/rank.png".to_string(),
                    caption: None,
                }],
            })
            .await
            .unwrap();

        let deletion = library.delete(&post.media_items[0].id).await.unwrap();
        assert!(!deletion.removed_post);
        assert!(ctx.posts().get(&post.post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reclassify_all_is_stable() {
        let (ctx, _dir) = test_context().await;
        let library = MediaLibrary::new(ctx.clone());

        let uploaded = library
            .upload(&upload("https://example.com/a.png", "screenshot"))
            .await
            .unwrap();
        // Simulate a row stored before classification existed.
        ctx.media()
            .update_kind(&uploaded.item.id, MediaKind::Video)
            .await
            .unwrap();

        assert_eq!(library.reclassify_all().await.unwrap(), 1);
        assert_eq!(library.reclassify_all().await.unwrap(), 0);
        let item = ctx.media().get(&uploaded.item.id).await.unwrap().unwrap();
        assert_eq!(item.kind, MediaKind::Screenshot);
    }
}
