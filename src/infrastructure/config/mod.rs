//! Infrastructure configuration modules.

pub mod llm;
pub mod logging;
pub mod sanity;
pub mod server;
pub mod settings;
pub mod site;
pub mod social;
