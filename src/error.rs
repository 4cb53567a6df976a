// src/error.rs
use gmlwfs_xml::XmlError;
use thiserror::Error;

/// Raised while assembling a dialect from its descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialectError {
    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("Dialect derivation cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("Dialect '{dialect}' uses alias '{alias}' which is not bound to a namespace")]
    UnboundAlias { dialect: String, alias: String },

    #[error("Dialect '{dialect}' registers a {kind} handler for {alias}:{local} in the wrong table")]
    MisplacedHandler {
        dialect: String,
        alias: String,
        local: String,
        kind: &'static str,
    },

    #[error("Dialect '{dialect}' inherits conflicting entry points ({candidates}); declare one explicitly")]
    AmbiguousEntryPoint { dialect: String, candidates: String },

    #[error("Dialect '{dialect}' imports table '{alias}' which its source does not define")]
    UnknownImport { dialect: String, alias: String },
}

/// Raised by the write engine. Writing is all-or-nothing: a failed call
/// returns no partial tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    #[error("No writer registered for '{0}'")]
    UnknownWriter(String),

    #[error("Prefix '{0}' is not bound in this dialect")]
    UnknownPrefix(String),

    #[error("Writer '{writer}' cannot take {found} input")]
    UnexpectedInput { writer: String, found: &'static str },

    #[error("Writing '{writer}' requires the '{option}' option")]
    MissingOption { writer: String, option: &'static str },

    #[error("Feature passed to '{0}' has no id")]
    MissingFeatureId(String),
}

/// Top-level error for the convenience entry points that parse or serialize.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Dialect construction failed: {0}")]
    Dialect(#[from] DialectError),

    #[error("Writing failed: {0}")]
    Write(#[from] WriteError),

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}
