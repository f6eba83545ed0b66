//! OpenAPI Documentation Core Library
//!
//! This library provides typed records for OpenAPI 2, 3 and 3.1 documents,
//! their serialization to JSON and YAML, and the generation of Markdown and
//! PlantUML documentation from existing OpenAPI documents.

pub mod config;
pub mod elements;
pub mod error;
pub mod mk;
pub mod normalize;
pub mod serializer;
pub mod source;
pub mod v2;
pub mod v3;
pub mod v31;
pub mod web;
pub mod yaml;

pub use crate::{
    config::Config,
    error::{Error, Result},
    mk::{generate::generate, generate_document, OutputStyle},
    normalize::Node,
    serializer::{Format, Serializer},
};
