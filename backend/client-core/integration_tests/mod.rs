mod clipboard;
mod correction;
mod credential_store;
mod deep_link;
