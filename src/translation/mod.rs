mod client;
mod error;
mod guard;
mod invoker;
mod model;

pub use client::OpenAiClient;
pub use error::TranslateError;
pub use guard::{QUOTA_TOKEN_LIMIT, UsageGuard};
pub use invoker::Translator;
pub use model::{
    Decision, TranslatePayload, TranslateResponse, TranslationRequest, TranslationResult,
    UsageQuery, UsageSnapshot, month_bounds,
};
