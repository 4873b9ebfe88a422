pub mod coach_directory;
pub mod own_profile;
pub mod player_directory;
