//! Quill Types - Pure type definitions for the blog
//!
//! This crate contains only plain data types with no async runtime or
//! database dependencies, so anything in the workspace can share them.

pub mod comment;
pub mod post;

pub use comment::*;
pub use post::*;
