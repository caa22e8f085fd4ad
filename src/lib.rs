pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod history;
pub mod ingredients;
pub mod notes;
pub mod profile;
pub mod reactions;
pub mod state;
pub mod trials;
pub mod wishlist;
