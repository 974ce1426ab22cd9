//! CLI module graph.

pub mod audit;
pub mod check;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod document;
pub mod editorial;
pub mod output;
pub mod paths;
pub mod repair;
pub mod serve;
pub mod social;
pub mod subscribers;
