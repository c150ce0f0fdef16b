//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod content;
pub mod publishing;
pub mod version;

pub use content::{
    CancelScheduleCommand, CancelScheduleHandler, CreateContentItemCommand,
    CreateContentItemHandler, CreateContentItemResult, DeleteContentItemCommand,
    DeleteContentItemHandler, DeleteContentItemResult, GetContentItemHandler,
    GetContentItemQuery, PublishContentItemCommand, PublishContentItemHandler,
    PublishContentItemResult, SaveDraftCommand, SaveDraftHandler, SaveDraftResult,
    ScheduleContentItemCommand, ScheduleContentItemHandler,
    UnpublishContentItemCommand, UnpublishContentItemHandler, UpdateContentItemCommand,
    UpdateContentItemHandler, UpdateContentItemResult,
};
pub use publishing::{PublishDueItemsCommand, PublishDueItemsHandler, PublishRunSummary};
pub use version::{
    CreateVersionCommand, CreateVersionHandler, GetVersionHandler, GetVersionQuery,
    ListVersionsHandler, ListVersionsQuery, RestoreVersionCommand, RestoreVersionHandler,
    RestoreVersionResult,
};
