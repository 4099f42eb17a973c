mod api;
pub mod oauth;
mod types;

use reqwest::Client;

pub use api::*;
pub use types::*;

lazy_static::lazy_static! {
    pub static ref HTTP: Client = Client::new();
}
