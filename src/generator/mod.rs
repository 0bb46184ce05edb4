//! Generator boundary
//!
//! A generator declares its argument groups, carries menu metadata, and
//! draws a finished layout onto a [`Document`]. The web layer and the CLI
//! both go through [`run_generator`]: open a document for the requested
//! format, render, close.

mod registry;

pub use registry::{GeneratorEntry, Registry};

use crate::args::{ArgError, ArgGroup, ArgSpec, ParsedArgs};
use crate::render::{Document, OutputFormat, RenderError, RenderedDocument};
use std::fmt;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Errors surfacing from a generator invocation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A submitted parameter failed to parse or validate
    #[error(transparent)]
    Arg(#[from] ArgError),

    /// The parameter combination is unusable (e.g. walls thicker than the box)
    #[error("{0}")]
    Value(String),

    /// Serialization failure
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl GeneratorError {
    /// Construct a plain value error
    pub fn value(msg: impl Into<String>) -> Self {
        GeneratorError::Value(msg.into())
    }

    /// Plain value errors are shown to the user without a server-side trace
    pub fn is_value_error(&self) -> bool {
        matches!(self, GeneratorError::Arg(_) | GeneratorError::Value(_))
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

// ============================================================
// UI Groups
// ============================================================

/// Menu sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UiGroup {
    Boxes,
    Trays,
    Parts,
    Misc,
    Unstable,
}

impl UiGroup {
    /// Section heading, translatable
    pub fn title(&self) -> &'static str {
        match self {
            UiGroup::Boxes => "Boxes",
            UiGroup::Trays => "Trays",
            UiGroup::Parts => "Parts",
            UiGroup::Misc => "Misc",
            UiGroup::Unstable => "Unstable",
        }
    }

    /// All groups in menu order
    pub fn all() -> &'static [UiGroup] {
        &[
            UiGroup::Boxes,
            UiGroup::Trays,
            UiGroup::Parts,
            UiGroup::Misc,
            UiGroup::Unstable,
        ]
    }
}

impl fmt::Display for UiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================
// Generator Trait
// ============================================================

/// A parametric design producing one document per invocation
pub trait Generator: Send + Sync {
    /// One-line summary shown in the menu and as the form subtitle
    fn summary(&self) -> &'static str;

    /// Longer description shown on the form page
    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Menu section this generator belongs to
    fn ui_group(&self) -> UiGroup {
        UiGroup::Misc
    }

    /// Excluded from the menu and the JSON index, still reachable by URL
    fn hidden(&self) -> bool {
        false
    }

    /// Argument groups in form display order
    fn arg_groups(&self) -> &[ArgGroup];

    /// Draw the configured layout
    fn render(&self, args: &ParsedArgs, doc: &mut Document) -> Result<()>;
}

/// The argument group shared by every generator.
///
/// `format` selects the output serialization for the instance, the rest are
/// the material parameters every layout consumes.
pub fn default_group() -> ArgGroup {
    ArgGroup::new(crate::args::DEFAULT_GROUP)
        .arg(ArgSpec::float("thickness", 3.0, "material thickness in mm"))
        .arg(ArgSpec::float("burn", 0.1, "burn compensation (kerf) in mm"))
        .arg(ArgSpec::boolean("labels", true, "label the panels"))
        .arg(ArgSpec::choice(
            "format",
            OutputFormat::default().id(),
            OutputFormat::CHOICES,
            "output format",
        ))
}

/// Run the full lifecycle for one invocation: open, render, close.
pub fn run_generator(generator: &dyn Generator, args: &ParsedArgs) -> Result<RenderedDocument> {
    let format = OutputFormat::from_id(args.str("format")?).ok_or_else(|| {
        // the choice arg already constrains this; a miss means a generator
        // declared its own incompatible `format` argument
        GeneratorError::value("unsupported output format")
    })?;
    let mut doc = Document::open(format);
    generator.render(args, &mut doc)?;
    Ok(doc.close()?)
}
