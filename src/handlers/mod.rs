pub mod community;
pub mod health;
pub mod job_applications;
pub mod jobs;
pub mod resume;
pub mod users;
