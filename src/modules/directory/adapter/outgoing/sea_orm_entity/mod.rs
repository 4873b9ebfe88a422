pub mod coach_profiles;
pub mod player_profiles;
