use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    /// Comma-separated, as typed into the registration form.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub salary_expectation: Option<f64>,
}

/// User storage seam. The service ships with an in-memory backend only.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn register(&self, user: NewUser) -> Result<User, AppError>;
    async fn count(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn register(&self, user: NewUser) -> Result<User, AppError> {
        let name = user.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.name.eq_ignore_ascii_case(name)) {
            return Err(AppError::Conflict(format!("User '{name}' already exists")));
        }

        let created = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age: user.age,
            skills: user
                .skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            salary_expectation: user.salary_expectation,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
