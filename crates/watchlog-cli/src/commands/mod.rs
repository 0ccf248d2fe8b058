pub mod config;
pub mod context;
pub mod history;
pub mod prompts;
pub mod settings;
