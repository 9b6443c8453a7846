mod handler;
mod model;

pub use handler::{create_post, delete_post, get_post, list_posts, update_post};
