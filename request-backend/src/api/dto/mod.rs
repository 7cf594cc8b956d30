// src/api/dto/mod.rs
pub mod user_dto;
