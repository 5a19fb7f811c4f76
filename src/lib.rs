pub mod commands;
pub mod error;
pub mod feed;
pub mod http;
pub mod package;
pub mod processor;
pub mod runtime;
pub mod selector;
