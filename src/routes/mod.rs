pub mod post;
pub mod social_link;
pub mod tag;
pub mod translate;
