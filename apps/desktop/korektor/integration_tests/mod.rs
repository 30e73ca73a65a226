mod helpers;
mod process_text;
mod session;
mod shell;
