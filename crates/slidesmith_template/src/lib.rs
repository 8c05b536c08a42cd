//! Template model, repository, and introspection for Slidesmith.
//!
//! Templates come in two mutually exclusive flavors:
//!
//! - **Whole-document templates** ship a `content.md` whose `${name}`
//!   placeholders are filled by a single substitution pass.
//! - **Unit-based templates** expose named slide-construction units,
//!   registered statically in a [`UnitRegistry`], each invoked with keyword
//!   parameters to produce one slide's Markdown.
//!
//! The [`inspect`] function discovers which flavor a template is and what it
//! requires, re-reading the backing source on every call so template edits
//! between runs are picked up.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod basic_deck;
mod introspect;
mod registry;
mod repository;
mod template;
mod unit;

pub use basic_deck::basic_deck_units;
pub use introspect::{extract_placeholders, inspect, parse_unit_doc};
pub use registry::UnitRegistry;
pub use repository::TemplateRepository;
pub use template::{SlideTemplate, TemplateConfig};
pub use unit::StaticUnit;
