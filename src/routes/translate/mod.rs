mod handler;

pub use handler::{translate, usage_report};
