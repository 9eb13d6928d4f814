pub mod answer;
pub mod config;
pub mod llm;
pub mod question;
pub mod shell;
pub mod terminal;
pub mod web;
