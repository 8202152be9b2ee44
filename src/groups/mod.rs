//! Groups module
//!
//! The group store owns the in-memory group collection and keeps the
//! persisted copy in sync after every mutation:
//! - `model` - `Group` and `Message` records and their serialized shape
//! - `ids` - creation-time message and group ids
//! - `seed` - the default groups written on first load
//! - `store` - `GroupStore`, the single authority over the collection

pub mod ids;
pub mod model;
pub mod seed;
pub mod store;

pub use model::{Group, Message, GROUP_AVATARS, GROUP_COLORS};
pub use store::{GroupStore, Overview};
