//! Property endpoints: public search and landlord management

mod manage;
mod search;

pub use manage::{create, delete, delete_media, list_mine, update};
pub use search::{get, search};
