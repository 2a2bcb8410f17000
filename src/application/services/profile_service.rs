//! Public profile lookup.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;

/// What an anonymous visitor sees on `/user/{username}`.
#[derive(Debug, Clone)]
pub struct Profile {
    pub username: String,
    pub links: Vec<Link>,
}

pub struct ProfileService<U: UserRepository, L: LinkRepository> {
    user_repository: Arc<U>,
    link_repository: Arc<L>,
}

impl<U: UserRepository, L: LinkRepository> ProfileService<U, L> {
    pub fn new(user_repository: Arc<U>, link_repository: Arc<L>) -> Self {
        Self {
            user_repository,
            link_repository,
        }
    }

    /// Loads a user's public profile. Usernames match exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this username.
    pub async fn get_profile(&self, username: &str) -> Result<Profile, AppError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))?;

        let links = self.link_repository.list_by_owner(user.id).await?;

        Ok(Profile {
            username: user.username,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockLinkRepository, MockUserRepository};
    use chrono::Utc;

    #[tokio::test]
    async fn test_get_profile() {
        let mut users = MockUserRepository::new();
        let mut links = MockLinkRepository::new();

        users
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .times(1)
            .returning(|_| {
                Ok(Some(User::new(
                    3,
                    "alice".to_string(),
                    "alice@x.com".to_string(),
                    "hash".to_string(),
                    Utc::now(),
                )))
            });
        links
            .expect_list_by_owner()
            .withf(|user_id| *user_id == 3)
            .times(1)
            .returning(|user_id| {
                Ok(vec![Link::new(
                    1,
                    "Blog".to_string(),
                    "https://alice.dev".to_string(),
                    user_id,
                    Utc::now(),
                )])
            });

        let service = ProfileService::new(Arc::new(users), Arc::new(links));

        let profile = service.get_profile("alice").await.unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.links.len(), 1);
        assert_eq!(profile.links[0].name, "Blog");
    }

    #[tokio::test]
    async fn test_get_profile_unknown_user() {
        let mut users = MockUserRepository::new();
        let mut links = MockLinkRepository::new();

        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        links.expect_list_by_owner().times(0);

        let service = ProfileService::new(Arc::new(users), Arc::new(links));

        let result = service.get_profile("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
