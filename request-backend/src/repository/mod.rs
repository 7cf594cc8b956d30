// src/repository/mod.rs
pub mod media_request_repository;
pub mod user_repository;
