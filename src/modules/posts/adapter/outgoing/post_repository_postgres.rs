use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::posts::application::domain::post::{Post, PostStatus};
use crate::modules::posts::application::ports::outgoing::{
    NewPost, PostRepository, PostRepositoryError, PostUpdate,
};

use super::post_query_postgres::map_to_post;
use super::sea_orm_entity::posts;

#[derive(Clone)]
pub struct PostRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Ownership check folded into the lookup: a post owned by someone else
    /// is reported as absent.
    async fn find_owned(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
    ) -> Result<posts::Model, PostRepositoryError> {
        posts::Entity::find_by_id(post_id)
            .filter(posts::Column::CoachUserId.eq(coach_user_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(PostRepositoryError::PostNotFound)
    }
}

fn map_db_err(e: sea_orm::DbErr) -> PostRepositoryError {
    PostRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostRepositoryPostgres {
    async fn create(&self, post: NewPost) -> Result<Post, PostRepositoryError> {
        let active = posts::ActiveModel {
            id: Set(Uuid::new_v4()),
            coach_user_id: Set(post.coach_user_id),
            post_type: Set(post.post_type.as_str().to_string()),
            title: Set(post.title),
            description: Set(post.description),
            date: Set(post.date.map(Into::into)),
            location: Set(post.location),
            region: Set(post.region),
            needs: Set(post.needs),
            status: Set(PostStatus::Active.as_str().to_string()),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        map_to_post(model).map_err(PostRepositoryError::DatabaseError)
    }

    async fn update_owned(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, PostRepositoryError> {
        let model = self.find_owned(post_id, coach_user_id).await?;

        let mut active: posts::ActiveModel = model.into();
        active.post_type = Set(update.post_type.as_str().to_string());
        active.title = Set(update.title);
        active.description = Set(update.description);
        active.date = Set(update.date.map(Into::into));
        active.location = Set(update.location);
        active.region = Set(update.region);
        active.needs = Set(update.needs);
        active.status = Set(update.status.as_str().to_string());

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        map_to_post(model).map_err(PostRepositoryError::DatabaseError)
    }

    async fn delete_owned(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
    ) -> Result<(), PostRepositoryError> {
        let model = self.find_owned(post_id, coach_user_id).await?;
        model.delete(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }
}
