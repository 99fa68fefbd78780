//! CLI subcommands.

pub mod auth;
pub mod common;
pub mod config;
pub mod files;
pub mod projects;
pub mod upload;
pub mod users;
