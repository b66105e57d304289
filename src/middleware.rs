// src/middleware.rs

pub mod auth;
pub mod request_id;
