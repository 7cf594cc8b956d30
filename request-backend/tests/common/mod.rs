// tests/common/mod.rs
pub mod app_helper;
pub mod db;
pub mod request;
