//! Integration tests for the content lifecycle.
//!
//! These tests wire the in-memory adapters end to end:
//! 1. Explicit saves archive the previously published revision
//! 2. The scheduled publish worker flips due items exactly once
//! 3. Restoring a version round-trips through the archive
//! 4. An autosave session moves from the local slot to the store
//!    after the first explicit save

use std::sync::Arc;
use std::time::Duration;

use content_lifecycle::adapters::memory::{InMemoryContentRepository, InMemoryVersionRepository};
use content_lifecycle::adapters::storage::{FileDraftCache, InMemoryDraftCache};
use content_lifecycle::application::autosave::{AutosaveOptions, AutosaveSession, SaveOutcome};
use content_lifecycle::application::handlers::{
    CreateContentItemCommand, CreateContentItemHandler, CreateVersionCommand,
    CreateVersionHandler, DeleteContentItemCommand, DeleteContentItemHandler,
    ListVersionsHandler, ListVersionsQuery, PublishContentItemCommand,
    PublishContentItemHandler, PublishDueItemsCommand, PublishDueItemsHandler,
    RestoreVersionCommand, RestoreVersionHandler, UpdateContentItemCommand,
    UpdateContentItemHandler,
};
use content_lifecycle::domain::content::{ContentFields, ContentItem, Publication};
use content_lifecycle::domain::draft::DraftTarget;
use content_lifecycle::domain::foundation::{AuthorId, ContentItemId, LocalDraftKey, Timestamp};
use content_lifecycle::domain::version::VersionNumber;
use content_lifecycle::ports::{ContentRepository, LocalDraftCache, VersionRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Stores {
    content: Arc<InMemoryContentRepository>,
    versions: Arc<InMemoryVersionRepository>,
}

impl Stores {
    fn new() -> Self {
        Self {
            content: Arc::new(InMemoryContentRepository::new()),
            versions: Arc::new(InMemoryVersionRepository::new()),
        }
    }

    fn worker(&self) -> PublishDueItemsHandler {
        PublishDueItemsHandler::new(self.content.clone(), self.versions.clone())
    }

    async fn create(&self, title: &str, body: &str) -> ContentItem {
        CreateContentItemHandler::new(self.content.clone())
            .handle(CreateContentItemCommand {
                author_id: author(),
                fields: ContentFields::with_title_and_body(title, body),
                publish: false,
            })
            .await
            .unwrap()
            .item
    }

    /// Stores an item whose schedule already lies in the past.
    async fn overdue(&self, title: &str, scheduled_at: Timestamp) -> ContentItem {
        let now = Timestamp::now();
        let item = ContentItem::reconstitute(
            ContentItemId::new(),
            author(),
            ContentFields::with_title_and_body(title, "Body").with_default_slug(),
            Publication::Scheduled { at: scheduled_at },
            None,
            0,
            now,
            now,
        );
        self.content.save(&item).await.unwrap();
        item
    }

    async fn item(&self, id: &ContentItemId) -> ContentItem {
        self.content.find_by_id(id).await.unwrap().unwrap()
    }
}

fn author() -> AuthorId {
    AuthorId::new("author-1").unwrap()
}

// =============================================================================
// Explicit saves and the version archive
// =============================================================================

#[tokio::test]
async fn published_revisions_are_archived_before_each_change() {
    let stores = Stores::new();
    let item = stores.create("Launch notes", "Draft body").await;

    // Draft edits do not snapshot
    UpdateContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(UpdateContentItemCommand {
            item_id: *item.id(),
            fields: ContentFields::with_title_and_body("Launch notes", "Second draft"),
            expected_revision: Some(0),
            actor: None,
        })
        .await
        .unwrap();
    assert_eq!(stores.versions.total_count().await, 0);

    let published = PublishContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(PublishContentItemCommand {
            item_id: *item.id(),
            fields: None,
            expected_revision: Some(1),
            actor: None,
        })
        .await
        .unwrap();
    assert_eq!(published.snapshot.version_number(), VersionNumber::FIRST);
    assert_eq!(published.snapshot.fields().body, "Second draft");

    let updated = UpdateContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(UpdateContentItemCommand {
            item_id: *item.id(),
            fields: ContentFields::with_title_and_body("Launch notes", "Live correction"),
            expected_revision: Some(published.item.revision()),
            actor: Some(AuthorId::new("editor-7").unwrap()),
        })
        .await
        .unwrap();
    let snapshot = updated.snapshot.unwrap();
    assert_eq!(snapshot.version_number().value(), 2);
    assert_eq!(snapshot.created_by().as_str(), "editor-7");

    let history = ListVersionsHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(ListVersionsQuery { item_id: *item.id() })
        .await
        .unwrap();
    let numbers: Vec<u32> = history.iter().map(|v| v.version_number().value()).collect();
    assert_eq!(numbers, vec![2, 1]);
}

#[tokio::test]
async fn restoring_a_version_round_trips_its_fields() {
    let stores = Stores::new();
    let item = stores.create("Original", "First body").await;

    let create_version = CreateVersionHandler::new(stores.content.clone(), stores.versions.clone());
    let v1 = create_version
        .handle(CreateVersionCommand {
            item_id: *item.id(),
            fields: None,
            created_by: None,
        })
        .await
        .unwrap();

    UpdateContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(UpdateContentItemCommand {
            item_id: *item.id(),
            fields: ContentFields::with_title_and_body("Rewritten", "Other body"),
            expected_revision: None,
            actor: None,
        })
        .await
        .unwrap();

    let restored = RestoreVersionHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(RestoreVersionCommand {
            item_id: *item.id(),
            version_number: v1.version_number(),
            expected_revision: None,
        })
        .await
        .unwrap();
    assert_eq!(restored.item.fields().title, "Original");
    // The slug stays where the item currently lives
    assert_eq!(restored.item.fields().slug, "rewritten");

    let v2 = create_version
        .handle(CreateVersionCommand {
            item_id: *item.id(),
            fields: None,
            created_by: None,
        })
        .await
        .unwrap();
    assert_eq!(v2.version_number().value(), 2);
    assert_eq!(v2.fields(), v1.fields());
}

#[tokio::test]
async fn deleting_an_item_removes_its_history() {
    let stores = Stores::new();
    let item = stores.create("Short lived", "Body").await;
    PublishContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(PublishContentItemCommand {
            item_id: *item.id(),
            fields: None,
            expected_revision: None,
            actor: None,
        })
        .await
        .unwrap();

    let result = DeleteContentItemHandler::new(stores.content.clone(), stores.versions.clone())
        .handle(DeleteContentItemCommand { item_id: *item.id() })
        .await
        .unwrap();

    assert_eq!(result.deleted_versions, 1);
    assert!(stores.content.find_by_id(item.id()).await.unwrap().is_none());
    assert!(stores.versions.list_for_item(item.id()).await.unwrap().is_empty());
}

// =============================================================================
// Scheduled publishing
// =============================================================================

#[tokio::test]
async fn overdue_item_is_published_at_its_scheduled_time() {
    let stores = Stores::new();
    let scheduled_at = Timestamp::now().minus_secs(1);
    let item = stores.overdue("Morning post", scheduled_at).await;

    let summary = stores.worker().handle(PublishDueItemsCommand::now()).await.unwrap();
    assert_eq!(summary.published_ids, vec![*item.id()]);

    let stored = stores.item(item.id()).await;
    assert!(stored.is_published());
    assert_eq!(stored.published_at(), Some(scheduled_at));
    assert_eq!(stored.scheduled_at(), None);

    let history = stores.versions.list_for_item(item.id()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].created_by(), &AuthorId::scheduler());
}

#[tokio::test]
async fn back_to_back_runs_publish_each_item_once() {
    let stores = Stores::new();
    stores.overdue("One", Timestamp::now().minus_secs(30)).await;
    stores.overdue("Two", Timestamp::now().minus_secs(10)).await;

    let worker = stores.worker();
    let first = worker.handle(PublishDueItemsCommand::now()).await.unwrap();
    let second = worker.handle(PublishDueItemsCommand::now()).await.unwrap();

    assert_eq!(first.count(), 2);
    assert_eq!(second.count(), 0);
    assert!(second.published_ids.is_empty());
    assert_eq!(stores.versions.total_count().await, 2);
}

#[tokio::test]
async fn nothing_due_performs_no_writes() {
    let stores = Stores::new();
    stores.create("Plain draft", "Body").await;
    let writes_before = stores.content.write_count();

    let summary = stores.worker().handle(PublishDueItemsCommand::now()).await.unwrap();

    assert_eq!(summary.count(), 0);
    assert!(summary.published_ids.is_empty());
    assert_eq!(stores.content.write_count(), writes_before);
    assert_eq!(stores.versions.total_count().await, 0);
}

// =============================================================================
// Autosave
// =============================================================================

#[tokio::test]
async fn new_item_draft_moves_from_local_slot_to_store() {
    let dir = tempfile::tempdir().unwrap();
    let stores = Stores::new();
    let cache = Arc::new(FileDraftCache::new(dir.path()));
    let key = LocalDraftKey::new_item();

    let session = AutosaveSession::open(
        DraftTarget::new_item(),
        ContentFields::default(),
        AutosaveOptions::default(),
        stores.content.clone(),
        cache.clone(),
    );

    session.edit(ContentFields::with_title_and_body("Untitled idea", "Some words"));
    assert_eq!(session.save_now().await.unwrap(), SaveOutcome::Saved);
    let slot = cache.load(&key).await.unwrap().unwrap();
    assert_eq!(slot.fields.title, "Untitled idea");

    // Recovery after a crash would resume from the local slot
    let recovered =
        AutosaveSession::recover_draft(&DraftTarget::new_item(), stores.content.as_ref(), cache.as_ref())
            .await
            .unwrap();
    assert_eq!(recovered, Some(slot.fields.clone()));

    let saved_fields = ContentFields::with_title_and_body("Untitled idea", "Some words");
    let created = stores.create("Untitled idea", "Some words").await;
    session
        .bind_remote(*created.id(), saved_fields)
        .await
        .unwrap();
    assert!(cache.load(&key).await.unwrap().is_none());

    session.edit(ContentFields::with_title_and_body("Untitled idea", "Some more words"));
    assert_eq!(session.save_now().await.unwrap(), SaveOutcome::Saved);

    let stored = stores.item(created.id()).await;
    let draft = ContentFields::from_snapshot(stored.draft_snapshot().unwrap()).unwrap();
    assert_eq!(draft.body, "Some more words");
    // Live fields are untouched by autosave
    assert_eq!(stored.fields().body, "Some words");

    assert!(!session.close().await);
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_produces_one_draft_write() {
    let stores = Stores::new();
    let item = stores.create("Title", "Body").await;
    let writes_before = stores.content.write_count();

    let session = AutosaveSession::open(
        DraftTarget::Persisted(*item.id()),
        item.fields().clone(),
        AutosaveOptions::default().with_quiescence(Duration::from_secs(5)),
        stores.content.clone(),
        Arc::new(InMemoryDraftCache::new()),
    );

    session.edit(ContentFields::with_title_and_body("X", "Body"));
    tokio::time::sleep(Duration::from_secs(2)).await;
    session.edit(ContentFields::with_title_and_body("XY", "Body"));
    tokio::time::sleep(Duration::from_millis(4900)).await;
    assert_eq!(stores.content.write_count(), writes_before);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(stores.content.write_count(), writes_before + 1);

    let stored = stores.item(item.id()).await;
    let draft = ContentFields::from_snapshot(stored.draft_snapshot().unwrap()).unwrap();
    assert_eq!(draft.title, "XY");
    assert!(!session.close().await);
}
