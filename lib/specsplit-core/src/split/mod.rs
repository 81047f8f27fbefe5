//! OpenAPI specification splitting utilities.
//!
//! This module provides tools for splitting a single OpenAPI specification into multiple files:
//! one file per schema, one file per path item, and a root document referencing them.
//!
//! # Overview
//!
//! Splitting is a pure transformation: an [`OpenApiSplitter`] consumes the loaded
//! document and returns a [`SplitResult`], the rewritten root document plus the
//! [`Fragment`]s to write. Nothing touches the filesystem until
//! [`SplitResult::write_to`] is called.
//!
//! # Example
//!
//! ```rust,no_run
//! use specsplit_core::split::{OpenApiSplitExt, SplitByComponent};
//! use specsplit_core::{SplitConfig, load_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = load_document("api/ksef-openapi.yaml")?;
//!
//! let splitter = SplitByComponent::new(SplitConfig::default().with_strip_prefix(2));
//! let result = spec.split_with(splitter)?;
//!
//! // Write the fragments, then openapi/openapi.yaml
//! result.write_to("openapi")?;
//! # Ok(())
//! # }
//! ```

mod fragment;
mod splitter;
mod strategies;

pub use fragment::{Fragment, ROOT_FILE, SplitResult};
pub use splitter::{OpenApiSplitExt, OpenApiSplitter};
pub use strategies::SplitByComponent;
