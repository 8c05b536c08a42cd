//! Output formats for the external renderer boundary.

use serde::{Deserialize, Serialize};

/// Target format for rendered presentations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RenderFormat {
    /// Portable Document Format
    Pdf,
    /// Standalone HTML deck
    Html,
    /// One PNG image of the first slide
    Png,
    /// PowerPoint presentation
    Pptx,
}

impl RenderFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Html => "html",
            RenderFormat::Png => "png",
            RenderFormat::Pptx => "pptx",
        }
    }
}
