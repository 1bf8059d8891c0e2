#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::{
    fmt,
    path::{Path, PathBuf}
};

/// Kind of reference a module specification or tree makes to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Entry of the module `walk` list.
    Walk,
    /// `old_index` side of a lookup declaration.
    LookupOldIndex,
    /// `new_index` side of a lookup declaration.
    LookupNewIndex,
    /// Index column named by a row entry.
    Index
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Walk => "walk target",
            Self::LookupOldIndex => "lookup old_index",
            Self::LookupNewIndex => "lookup new_index",
            Self::Index => "index"
        };
        f.write_str(name)
    }
}

/// Unified error type returned by the tree normalizer, the module generator
/// and the CLI.
///
/// Generation is a one-shot computation: any variant aborts the run and no
/// partial configuration is produced.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading input documents.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Location of the input document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors of the generator configuration.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps JSON decoding errors of the MIB node tree.
    #[error("failed to parse MIB tree: {source}")]
    TreeParse {
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// Wraps serialization errors when writing the exporter configuration.
    #[error("failed to serialize exporter configuration: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_yaml::Error
    },
    /// A reference matches neither a known label nor a well-formed OID.
    #[error("cannot resolve {kind} '{reference}'")]
    UnresolvedReference {
        /// Where the reference was made.
        kind:      ReferenceKind,
        /// The label or OID as written.
        reference: String
    },
    /// A label needed for resolution is carried by more than one node.
    #[error("label '{label}' is ambiguous, it names more than one node")]
    AmbiguousLabel {
        /// The duplicated label.
        label: String
    },
    /// A row entry augments a table that cannot supply indexes.
    #[error("entry '{entry}' cannot augment '{target}': {reason}")]
    Augmentation {
        /// Label of the augmenting entry.
        entry:  String,
        /// Label named by the entry's augments clause.
        target: String,
        /// Why the target could not be used.
        reason: String
    },
    /// Returned when inputs violate generator invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Attaches the module name to a failure raised while generating it.
    #[error("failed to generate module '{name}': {source}")]
    Module {
        /// Name of the module as declared in the generator configuration.
        name:   String,
        /// Underlying generation failure.
        source: Box<Error>
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs an unresolved reference error.
    pub fn unresolved<R>(kind: ReferenceKind, reference: R) -> Self
    where
        R: Into<String>
    {
        Self::UnresolvedReference {
            kind,
            reference: reference.into()
        }
    }

    pub(crate) fn augmentation(entry: &str, target: &str, reason: &str) -> Self {
        Self::Augmentation {
            entry:  entry.to_owned(),
            target: target.to_owned(),
            reason: reason.to_owned()
        }
    }

    /// Wraps the error with the name of the module being generated.
    pub fn in_module(self, name: &str) -> Self {
        Self::Module {
            name:   name.to_owned(),
            source: Box::new(self)
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::TreeParse {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the input that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
