use uuid::Uuid;

use crate::{
    db::Store,
    error::{ApiError, ApiResult},
    models::{Score, User, UserStats},
};

pub async fn create_user(store: &dyn Store, name: &str, email: Option<&str>) -> ApiResult<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidRequest("A user name is required".to_string()));
    }
    let email = email.map(str::trim).filter(|e| !e.is_empty());

    let user = store.create_user(name, email).await?;
    tracing::info!("Created user {} ({})", user.name, user.user_id);
    Ok(user)
}

pub async fn get_user(store: &dyn Store, name: &str) -> ApiResult<User> {
    store
        .find_user(name)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".to_string()))
}

/// Users who have played, ranked by win percentage
pub async fn rankings(store: &dyn Store) -> ApiResult<Vec<UserStats>> {
    let users = store.user_rankings().await?;
    Ok(users.iter().map(User::to_stats).collect())
}

pub async fn user_scores(store: &dyn Store, name: &str) -> ApiResult<Vec<Score>> {
    let user = get_user(store, name).await?;
    Ok(store.scores_for_user(user.user_id).await?)
}

pub async fn get_score(store: &dyn Store, score_id: Uuid) -> ApiResult<Score> {
    store
        .get_score(score_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Score not found!".to_string()))
}

pub async fn all_scores(store: &dyn Store) -> ApiResult<Vec<Score>> {
    Ok(store.all_scores().await?)
}
