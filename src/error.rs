use thiserror::Error;

/// Construction errors raised while assembling a stub package.
///
/// All of these point at a malformed stub definition, never at user input.
/// The core reports them as values so they can be tested; the registry
/// refuses to expose a package whose builder produced one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StubError {
    #[error("{package}: duplicate declaration of {name}")]
    DuplicateName { package: String, name: String },

    #[error("{package}: method {type_name}.{method} already declared")]
    DuplicateMethod {
        package: String,
        type_name: String,
        method: String,
    },

    #[error("{package}: underlying type of {name} already set")]
    UnderlyingAlreadySet { package: String, name: String },

    #[error("{package}: package is sealed")]
    TypeSealed { package: String },

    #[error("{package}: named type {name} has no underlying type")]
    IncompleteType { package: String, name: String },

    #[error("{package}: interface is not complete")]
    InterfaceNotComplete { package: String },

    #[error("{package}: interface is complete; cannot add method {method}")]
    InterfaceSealed { package: String, method: String },

    #[error("{package}: receiver of {method} does not denote {type_name}")]
    InvalidReceiver {
        package: String,
        type_name: String,
        method: String,
    },

    #[error("{package}: type is not an interface")]
    NotAnInterface { package: String },
}

impl StubError {
    /// Short machine-friendly tag, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            StubError::DuplicateName { .. } => "duplicate-name",
            StubError::DuplicateMethod { .. } => "duplicate-method",
            StubError::UnderlyingAlreadySet { .. } => "underlying-already-set",
            StubError::TypeSealed { .. } => "type-sealed",
            StubError::IncompleteType { .. } => "incomplete-type",
            StubError::InterfaceNotComplete { .. } => "interface-not-complete",
            StubError::InterfaceSealed { .. } => "interface-sealed",
            StubError::InvalidReceiver { .. } => "invalid-receiver",
            StubError::NotAnInterface { .. } => "not-an-interface",
        }
    }
}

/// Errors visible to consumers of a [`crate::Registry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unsupported import: {0:?}")]
    NotFound(String),
}

pub type Result<T, E = StubError> = std::result::Result<T, E>;
