mod handler;
mod model;

pub use handler::{create_tag, delete_tag, list_tags};
pub use model::Tag;
