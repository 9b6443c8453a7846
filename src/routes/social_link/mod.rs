mod handler;
mod model;

pub use handler::{create_social_link, delete_social_link, list_social_links};
