use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::posts::application::domain::post::Post;
use crate::modules::posts::application::ports::outgoing::{
    NewPost, PostRepository, PostRepositoryError, PostUpdate,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostAuthorError {
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Covers absent posts and posts owned by someone else.
    #[error("Post not found")]
    PostNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write side of the post board. Callers are already known to be verified
/// coaches; the route layer enforces that. Ownership of existing posts is
/// enforced here, via the repository.
#[async_trait]
pub trait PostAuthorUseCase: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, PostAuthorError>;

    async fn update(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, PostAuthorError>;

    async fn delete(&self, post_id: Uuid, coach_user_id: Uuid) -> Result<(), PostAuthorError>;
}

pub struct PostAuthorService<R>
where
    R: PostRepository,
{
    post_repository: R,
}

impl<R> PostAuthorService<R>
where
    R: PostRepository,
{
    pub fn new(post_repository: R) -> Self {
        Self { post_repository }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), PostAuthorError> {
    if value.trim().is_empty() {
        Err(PostAuthorError::MissingField(field))
    } else {
        Ok(())
    }
}

fn map_repo_error(e: PostRepositoryError) -> PostAuthorError {
    match e {
        PostRepositoryError::PostNotFound => PostAuthorError::PostNotFound,
        PostRepositoryError::DatabaseError(msg) => PostAuthorError::DatabaseError(msg),
    }
}

#[async_trait]
impl<R> PostAuthorUseCase for PostAuthorService<R>
where
    R: PostRepository,
{
    async fn create(&self, post: NewPost) -> Result<Post, PostAuthorError> {
        require(&post.title, "title")?;
        require(&post.description, "description")?;
        require(&post.region, "region")?;

        let created = self
            .post_repository
            .create(post)
            .await
            .map_err(map_repo_error)?;

        info!(post_id = %created.id, coach_user_id = %created.coach_user_id, "Post created");
        Ok(created)
    }

    async fn update(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, PostAuthorError> {
        require(&update.title, "title")?;
        require(&update.description, "description")?;
        require(&update.region, "region")?;

        self.post_repository
            .update_owned(post_id, coach_user_id, update)
            .await
            .map_err(map_repo_error)
    }

    async fn delete(&self, post_id: Uuid, coach_user_id: Uuid) -> Result<(), PostAuthorError> {
        self.post_repository
            .delete_owned(post_id, coach_user_id)
            .await
            .map_err(map_repo_error)?;

        info!(post_id = %post_id, coach_user_id = %coach_user_id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::posts::application::domain::post::{PostStatus, PostType};
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Repo {}
        #[async_trait]
        impl PostRepository for Repo {
            async fn create(&self, post: NewPost) -> Result<Post, PostRepositoryError>;
            async fn update_owned(
                &self,
                post_id: Uuid,
                coach_user_id: Uuid,
                update: PostUpdate,
            ) -> Result<Post, PostRepositoryError>;
            async fn delete_owned(
                &self,
                post_id: Uuid,
                coach_user_id: Uuid,
            ) -> Result<(), PostRepositoryError>;
        }
    }

    fn draft(coach_user_id: Uuid) -> NewPost {
        NewPost {
            coach_user_id,
            post_type: PostType::Tryout,
            title: "U15 goalkeeper tryout".to_string(),
            description: "Open tryout, bring boots".to_string(),
            date: None,
            location: Some("North Field 2".to_string()),
            region: "North".to_string(),
            needs: Some("GK".to_string()),
        }
    }

    fn stored(post: &NewPost) -> Post {
        Post {
            id: Uuid::new_v4(),
            coach_user_id: post.coach_user_id,
            post_type: post.post_type,
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date,
            location: post.location.clone(),
            region: post.region.clone(),
            needs: post.needs.clone(),
            status: PostStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_rejects_a_blank_title_before_touching_the_store() {
        let repo = MockRepo::new(); // create must not be called

        let service = PostAuthorService::new(repo);
        let mut post = draft(Uuid::new_v4());
        post.title = "   ".to_string();

        let result = service.create(post).await;
        assert!(matches!(result, Err(PostAuthorError::MissingField("title"))));
    }

    #[tokio::test]
    async fn create_persists_a_valid_draft() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|post| Ok(stored(&post)));

        let service = PostAuthorService::new(repo);
        let post = service.create(draft(Uuid::new_v4())).await.unwrap();

        assert_eq!(post.status, PostStatus::Active);
    }

    #[tokio::test]
    async fn update_of_a_post_you_do_not_own_reads_as_not_found() {
        let mut repo = MockRepo::new();
        repo.expect_update_owned()
            .returning(|_, _, _| Err(PostRepositoryError::PostNotFound));

        let service = PostAuthorService::new(repo);
        let update = PostUpdate {
            post_type: PostType::Tryout,
            title: "U15 tryout".to_string(),
            description: "Open tryout".to_string(),
            date: None,
            location: None,
            region: "North".to_string(),
            needs: None,
            status: PostStatus::Inactive,
        };

        let result = service.update(Uuid::new_v4(), Uuid::new_v4(), update).await;
        assert!(matches!(result, Err(PostAuthorError::PostNotFound)));
    }
}
