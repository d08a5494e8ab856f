mod repository;

pub use repository::TagsRepository;
