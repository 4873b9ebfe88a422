use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{PlayerDetail, PlayerListItem};
use crate::modules::directory::application::ports::outgoing::{PlayerFilter, ProfileQuery};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerDirectoryError {
    /// Covers absent, private and unverified profiles alike.
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait PlayerDirectoryUseCase: Send + Sync {
    async fn list(&self, filter: PlayerFilter) -> Result<Vec<PlayerListItem>, PlayerDirectoryError>;
    async fn get(&self, user_id: Uuid) -> Result<PlayerDetail, PlayerDirectoryError>;
}

pub struct PlayerDirectoryService<Q>
where
    Q: ProfileQuery,
{
    profile_query: Q,
}

impl<Q> PlayerDirectoryService<Q>
where
    Q: ProfileQuery,
{
    pub fn new(profile_query: Q) -> Self {
        Self { profile_query }
    }
}

#[async_trait]
impl<Q> PlayerDirectoryUseCase for PlayerDirectoryService<Q>
where
    Q: ProfileQuery,
{
    async fn list(&self, filter: PlayerFilter) -> Result<Vec<PlayerListItem>, PlayerDirectoryError> {
        self.profile_query
            .list_players(filter)
            .await
            .map_err(|e| PlayerDirectoryError::QueryError(e.to_string()))
    }

    async fn get(&self, user_id: Uuid) -> Result<PlayerDetail, PlayerDirectoryError> {
        self.profile_query
            .find_public_player(user_id)
            .await
            .map_err(|e| PlayerDirectoryError::QueryError(e.to_string()))?
            .ok_or(PlayerDirectoryError::ProfileNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::directory::application::domain::profiles::{
        CoachDetail, CoachListItem, OwnProfile, PlayerProfile,
    };
    use crate::modules::directory::application::ports::outgoing::{
        CoachFilter, ProfileQueryError,
    };
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Profiles {}
        #[async_trait]
        impl ProfileQuery for Profiles {
            async fn list_players(
                &self,
                filter: PlayerFilter,
            ) -> Result<Vec<PlayerListItem>, ProfileQueryError>;
            async fn find_public_player(
                &self,
                user_id: Uuid,
            ) -> Result<Option<PlayerDetail>, ProfileQueryError>;
            async fn list_coaches(
                &self,
                filter: CoachFilter,
            ) -> Result<Vec<CoachListItem>, ProfileQueryError>;
            async fn find_public_coach(
                &self,
                user_id: Uuid,
            ) -> Result<Option<CoachDetail>, ProfileQueryError>;
            async fn find_own_profile(
                &self,
                user_id: Uuid,
            ) -> Result<Option<OwnProfile>, ProfileQueryError>;
        }
    }

    fn player_profile(user_id: Uuid) -> PlayerProfile {
        PlayerProfile {
            user_id,
            first_name: Some("Alex".to_string()),
            last_name: Some("Keeper".to_string()),
            team: Some("FC North U15".to_string()),
            position: Some("GK".to_string()),
            level: Some("Division 1".to_string()),
            age_group: Some("U15".to_string()),
            region: Some("North".to_string()),
            bio: None,
            contact_email: None,
            contact_phone: None,
            photo_url: None,
            is_public: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn list_passes_the_filter_through() {
        let mut query = MockProfiles::new();
        query
            .expect_list_players()
            .withf(|f: &PlayerFilter| {
                f.age_group.as_deref() == Some("U15") && f.search.as_deref() == Some("keeper")
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = PlayerDirectoryService::new(query);
        let filter = PlayerFilter {
            age_group: Some("U15".to_string()),
            search: Some("keeper".to_string()),
            ..Default::default()
        };

        assert!(service.list(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn hidden_profile_is_indistinguishable_from_absent() {
        let mut query = MockProfiles::new();
        query.expect_find_public_player().returning(|_| Ok(None));

        let service = PlayerDirectoryService::new(query);
        let result = service.get(Uuid::new_v4()).await;

        assert!(matches!(result, Err(PlayerDirectoryError::ProfileNotFound)));
    }

    #[tokio::test]
    async fn visible_profile_is_returned_with_media() {
        let user_id = Uuid::new_v4();
        let mut query = MockProfiles::new();
        query.expect_find_public_player().returning(move |_| {
            Ok(Some(PlayerDetail {
                profile: player_profile(user_id),
                media: vec![],
            }))
        });

        let service = PlayerDirectoryService::new(query);
        let detail = service.get(user_id).await.unwrap();

        assert_eq!(detail.profile.user_id, user_id);
    }
}
