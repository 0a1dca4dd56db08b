//! Memory tags and pending items
//!
//! Tagged memories are indexed by tag for later lookup. Pending items are
//! follow-ups the assistant should raise again until they are resolved.

pub mod pending;
pub mod store;
pub mod tags;

pub use pending::{PendingItem, PendingItems, Priority};
pub use store::NoteStore;
pub use tags::{search_by_tag, tag_memory, Importance, TagEntry, TagIndex, TagSearch};
