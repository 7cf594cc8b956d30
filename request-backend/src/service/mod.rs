// src/service/mod.rs
pub mod plex_service;
pub mod user_service;
