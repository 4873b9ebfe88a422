pub mod author_posts;
pub mod browse_posts;
