pub mod catalog;
pub mod config;
pub mod core;
pub mod media;
pub mod sessions;
pub mod transitions;
