pub mod profile_query;
pub mod profile_repository;

pub use profile_query::{
    CoachFilter, PlayerFilter, ProfileQuery, ProfileQueryError, ProfileSort,
};
pub use profile_repository::{
    CoachProfileUpdate, PlayerProfileUpdate, ProfileRepository, ProfileRepositoryError,
};
