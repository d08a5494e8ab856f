pub mod sqlite_tag_store;

pub use sqlite_tag_store::SqliteTagStore;
