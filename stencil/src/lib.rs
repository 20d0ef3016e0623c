#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs, rustdoc::broken_intra_doc_links)]

mod tracing_macros;

mod document;
mod element;
mod error;
pub mod escape;
mod node;
mod render;
mod sink;
mod splice;
mod template;

pub use document::{Document, XML_DECLARATION};
pub use element::{ElementKind, Tag};
pub use error::{SpliceError, TemplateError};
pub use node::{Attributes, Never, Node};
pub use render::{Anchor, render, render_into, render_literal, rendered_len};
pub use sink::Sink;
pub use splice::{DEFAULT_DEPTH_LIMIT, Spliced};
pub use template::FrozenTemplate;
