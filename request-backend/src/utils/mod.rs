// src/utils/mod.rs
pub mod jwt;
