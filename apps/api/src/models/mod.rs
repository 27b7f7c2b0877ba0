pub mod career;
pub mod resume;
pub mod user;
