pub mod http_tag_store;

pub use http_tag_store::HttpTagStore;
