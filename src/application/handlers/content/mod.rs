//! Content lifecycle command and query handlers.

mod cancel_schedule;
mod create_content_item;
mod delete_content_item;
mod get_content_item;
mod publish_content_item;
mod save_draft;
mod schedule_content_item;
mod unpublish_content_item;
mod update_content_item;

pub use cancel_schedule::{CancelScheduleCommand, CancelScheduleHandler};
pub use create_content_item::{
    CreateContentItemCommand, CreateContentItemHandler, CreateContentItemResult,
};
pub use delete_content_item::{
    DeleteContentItemCommand, DeleteContentItemHandler, DeleteContentItemResult,
};
pub use get_content_item::{GetContentItemHandler, GetContentItemQuery};
pub use publish_content_item::{
    PublishContentItemCommand, PublishContentItemHandler, PublishContentItemResult,
};
pub use save_draft::{SaveDraftCommand, SaveDraftHandler, SaveDraftResult};
pub use schedule_content_item::{ScheduleContentItemCommand, ScheduleContentItemHandler};
pub use unpublish_content_item::{UnpublishContentItemCommand, UnpublishContentItemHandler};
pub use update_content_item::{
    UpdateContentItemCommand, UpdateContentItemHandler, UpdateContentItemResult,
};
