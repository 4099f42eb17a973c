pub mod config;
pub mod credentials;
pub mod page;
pub mod server;
pub mod upload;

pub mod google_drive;
