// src/clients.rs

pub mod token;
pub mod xcs;

pub use token::{BearerToken, TokenProvider};
pub use xcs::{XcsClient, XcsSession};
