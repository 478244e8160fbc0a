pub mod assets;
pub mod audio;
pub mod config;
pub mod secret;
pub mod skill;
pub mod version;
pub mod web;
