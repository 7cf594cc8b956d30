// src/domain/mod.rs
pub mod media_request_model;
pub mod permission;
pub mod user_model;
pub mod user_policy;
