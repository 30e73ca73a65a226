mod file;
mod memory;
