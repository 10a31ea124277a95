pub mod auth;
pub mod jobs;
pub mod response;
pub mod routes;
