// src/handlers.rs

pub mod access_points;
pub mod account;
pub mod admin;
pub mod locations;
pub mod organizations;
pub mod roblox;
