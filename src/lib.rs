pub mod common;
pub mod config;
pub mod demo;
pub mod error;
pub mod headless;
pub mod session;
pub mod theme;
pub mod ui;
