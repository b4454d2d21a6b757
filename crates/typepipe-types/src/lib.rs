//! Shared types for typepipe
//!
//! This crate contains the configuration consumed by the line processing loop.
//! A `Config` is built once from the command line and never mutated.

use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Type Tags
// ============================================================================

/// A named category of line content
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    /// Matches every line
    All,
    /// Matches no line
    None,
    /// Matches lines that parse as a single JSON value
    Json,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::All => "all",
            TypeTag::None => "none",
            TypeTag::Json => "json",
        }
    }
}

/// Non-empty set of enabled type tags
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSet {
    tags: BTreeSet<TypeTag>,
}

impl TypeSet {
    /// Build a set from the given tags, falling back to `{all}` when empty
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = TypeTag>,
    {
        let mut tags: BTreeSet<TypeTag> = tags.into_iter().collect();
        if tags.is_empty() {
            tags.insert(TypeTag::All);
        }
        Self { tags }
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.tags.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Never true, an empty set is replaced by `{all}` on construction
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TypeSet {
    fn default() -> Self {
        Self::from_tags([TypeTag::All])
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.tags.iter().map(TypeTag::name).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// How a matched line is normalized before it is transformed or emitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StripMode {
    #[default]
    None,
    /// Trim leading and trailing whitespace
    TrimWhitespace,
    /// Remove a single trailing `\n`
    StripTrailingNewlineOnly,
}

impl StripMode {
    /// Resolve the two strip flags. A full trim wins when both are set.
    pub fn from_flags(strip: bool, strip_trailing_newline: bool) -> Self {
        if strip {
            StripMode::TrimWhitespace
        } else if strip_trailing_newline {
            StripMode::StripTrailingNewlineOnly
        } else {
            StripMode::None
        }
    }
}

// ============================================================================
// Transform Command
// ============================================================================

/// External program that matched lines are piped to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split an argv into program and arguments. Returns `None` for an empty argv.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Immutable configuration for one run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub types: TypeSet,
    /// Invert the match result
    pub complement: bool,
    /// Drop unmatched lines instead of passing them through
    pub filter_unmatched: bool,
    pub strip: StripMode,
    /// `None` means passthrough only
    pub command: Option<CommandSpec>,
}

impl Config {
    pub fn new(types: TypeSet) -> Self {
        Self {
            types,
            ..Default::default()
        }
    }

    pub fn with_complement(mut self, complement: bool) -> Self {
        self.complement = complement;
        self
    }

    pub fn with_filter_unmatched(mut self, filter_unmatched: bool) -> Self {
        self.filter_unmatched = filter_unmatched;
        self
    }

    pub fn with_strip(mut self, strip: StripMode) -> Self {
        self.strip = strip;
        self
    }

    pub fn with_command(mut self, command: Option<CommandSpec>) -> Self {
        self.command = command;
        self
    }
}
