use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u32>,
    pub skills: Vec<String>,
    pub salary_expectation: Option<f64>,
    pub created_at: DateTime<Utc>,
}
