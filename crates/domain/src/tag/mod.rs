mod entity;
mod store;

pub use entity::{FALLBACK_COLOR, Tag};
pub use store::TagStore;
