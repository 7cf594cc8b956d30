// src/api/handlers/mod.rs
pub mod user_handler;
