pub mod auth;
pub mod directory;
pub mod email;
pub mod media;
pub mod messaging;
pub mod posts;
