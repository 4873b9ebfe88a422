pub mod coaches;
pub mod own_profile;
pub mod players;
