use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Whether an operation can change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    /// Read-only; never gated.
    Safe,
    /// Create, update or delete; gated.
    Unsafe,
}

/// An operation performed on a forum resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Enumerate resources of a kind.
    List,
    /// Read a single resource.
    Retrieve,
    /// Create a resource under a parent.
    Create,
    /// Edit an existing resource.
    Update,
    /// Remove an existing resource.
    Delete,
}

impl Operation {
    /// Every operation, reads first.
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    /// Classify this operation.
    pub fn class(self) -> OperationClass {
        match self {
            Self::List | Self::Retrieve => OperationClass::Safe,
            Self::Create | Self::Update | Self::Delete => OperationClass::Unsafe,
        }
    }

    /// Whether this operation is read-only.
    pub fn is_safe(self) -> bool {
        self.class() == OperationClass::Safe
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}
