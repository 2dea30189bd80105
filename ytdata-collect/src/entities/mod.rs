//! Channel, video and playlist entities.
//!
//! Entities are cheap handles: an id plus a shared API. Attributes are
//! fetched lazily and equality is by id only.

mod channel;
mod playlist;
mod video;

pub use channel::Channel;
pub use playlist::Playlist;
pub use video::Video;
