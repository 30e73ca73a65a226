pub mod clipboard;
pub mod config;
pub mod correction;
pub mod credential_store;
pub mod deep_link;
pub mod error;
pub mod paths;

#[cfg(test)]
mod tests;

pub const APP_NAME: &str = "korektor";
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const CHAT_COMPLETIONS_URL: &str =
    const_format::concatcp!(OPENAI_API_BASE_URL, "/chat/completions");
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const CREDENTIAL_KEY: &str = "openai_api_key";
pub const SHARED_TEXT_PARAM: &str = "text";
