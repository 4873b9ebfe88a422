use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query as SubQuery, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::directory::adapter::outgoing::sea_orm_entity::coach_profiles;
use crate::modules::posts::application::domain::post::{Post, PostStatus, PostType};
use crate::modules::posts::application::ports::outgoing::{PostFilter, PostQuery, PostQueryError};

use super::sea_orm_entity::posts;

#[derive(Clone)]
pub struct PostQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Coach user ids whose posts are publicly listable: public profile,
    /// verified account, matching the optional level/region filter.
    fn listable_coach_ids(level: Option<&str>, region: Option<&str>) -> SelectStatement {
        let verified = SubQuery::select()
            .column(users::Column::Id)
            .from(users::Entity)
            .and_where(Expr::col(users::Column::EmailVerifiedAt).is_not_null())
            .to_owned();

        let mut query = SubQuery::select()
            .column(coach_profiles::Column::UserId)
            .from(coach_profiles::Entity)
            .and_where(Expr::col(coach_profiles::Column::IsPublic).eq(true))
            .and_where(Expr::col(coach_profiles::Column::UserId).in_subquery(verified))
            .to_owned();

        if let Some(level) = level {
            query.and_where(Expr::col(coach_profiles::Column::Level).eq(level));
        }
        if let Some(region) = region {
            query.and_where(Expr::col(coach_profiles::Column::Region).eq(region));
        }

        query
    }
}

fn map_db_err(e: sea_orm::DbErr) -> PostQueryError {
    PostQueryError::DatabaseError(e.to_string())
}

pub(crate) fn map_to_post(model: posts::Model) -> Result<Post, String> {
    let post_type = PostType::from_str(&model.post_type)
        .ok_or_else(|| format!("unknown post type in posts row: {}", model.post_type))?;
    let status = PostStatus::from_str(&model.status)
        .ok_or_else(|| format!("unknown status in posts row: {}", model.status))?;

    Ok(Post {
        id: model.id,
        coach_user_id: model.coach_user_id,
        post_type,
        title: model.title,
        description: model.description,
        date: model.date.map(Into::into),
        location: model.location,
        region: model.region,
        needs: model.needs,
        status,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

fn collect_posts(models: Vec<posts::Model>) -> Result<Vec<Post>, PostQueryError> {
    models
        .into_iter()
        .map(|m| map_to_post(m).map_err(PostQueryError::DatabaseError))
        .collect()
}

#[async_trait]
impl PostQuery for PostQueryPostgres {
    async fn list_public(&self, filter: PostFilter) -> Result<Vec<Post>, PostQueryError> {
        let mut query = posts::Entity::find()
            .filter(posts::Column::Status.eq(PostStatus::Active.as_str()))
            .filter(posts::Column::CoachUserId.in_subquery(Self::listable_coach_ids(
                filter.level.as_deref(),
                filter.region.as_deref(),
            )));

        if let Some(post_type) = filter.post_type {
            query = query.filter(posts::Column::PostType.eq(post_type.as_str()));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                Condition::any()
                    .add(Expr::col(posts::Column::Title).ilike(&pattern))
                    .add(Expr::col(posts::Column::Description).ilike(&pattern))
                    .add(Expr::col(posts::Column::Location).ilike(&pattern)),
            );
        }

        let models = query
            .order_by_desc(posts::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        collect_posts(models)
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostQueryError> {
        posts::Entity::find_by_id(post_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|m| map_to_post(m).map_err(PostQueryError::DatabaseError))
            .transpose()
    }

    async fn list_by_coach(&self, coach_user_id: Uuid) -> Result<Vec<Post>, PostQueryError> {
        let models = posts::Entity::find()
            .filter(posts::Column::CoachUserId.eq(coach_user_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        collect_posts(models)
    }

    async fn list_active_by_coach(
        &self,
        coach_user_id: Uuid,
    ) -> Result<Vec<Post>, PostQueryError> {
        let models = posts::Entity::find()
            .filter(posts::Column::CoachUserId.eq(coach_user_id))
            .filter(posts::Column::Status.eq(PostStatus::Active.as_str()))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        collect_posts(models)
    }
}
