//! Social carousel generation and publishing.

pub mod caption;
pub mod pipeline;
pub mod slides;
pub mod tips;

pub use pipeline::{CarouselPipeline, DryRunReport, PipelineOutcome};
pub use slides::SlideStyle;
