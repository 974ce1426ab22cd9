//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as the CMS,
//! storage, text generation, form sinks and the social publishing chain.

pub mod cms;
pub mod form;
pub mod llm;
pub mod media;
pub mod photo;
pub mod publish;
pub mod render;
pub mod subscriber;
