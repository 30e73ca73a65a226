mod error;
mod logger;
mod shell;
mod state;
