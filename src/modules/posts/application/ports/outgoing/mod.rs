pub mod post_query;
pub mod post_repository;

pub use post_query::{PostFilter, PostQuery, PostQueryError};
pub use post_repository::{NewPost, PostRepository, PostRepositoryError, PostUpdate};
