pub mod auth;
pub mod content;
pub mod error;
pub mod portfolio;
pub mod state;
pub mod store;
pub mod sync;
pub mod tabs;
pub mod web;
