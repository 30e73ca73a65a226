mod clipboard;
mod config;
mod correction_error;
mod deep_link;
mod paths;
mod wire;
