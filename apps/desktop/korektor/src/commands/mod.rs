pub mod clipboard;
pub mod correction;
pub mod credential;
pub mod deep_link;
pub mod process_text;
