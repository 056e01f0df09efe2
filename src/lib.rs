pub mod adapters;
pub mod annotation;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod mock;
pub mod nms;
pub mod report;
pub mod schema;

pub use annotation::AnnotationResult;
pub use catalog::{Catalog, Priority, categorize};
pub use config::FusionConfig;
pub use engine::FusionEngine;
pub use schema::FusionResult;
