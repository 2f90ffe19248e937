//! Generated alter-script statements
//!
//! Every generator in [`crate::compile`] produces [`Statement`] values. The
//! kind/level pair drives global ordering, and `activated` records whether the
//! statement was rendered inert by drop-gating.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Add,
    Modify,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementLevel {
    Keyspace,
    Table,
    Field,
    Index,
    Udt,
    View,
    Udf,
    /// Reserved. Kept in the precedence table, nothing generates it yet.
    Renewal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub text: String,
    pub activated: bool,
    pub kind: StatementKind,
    pub level: StatementLevel,
}

impl Statement {
    pub fn new(text: impl Into<String>, kind: StatementKind, level: StatementLevel) -> Self {
        Self {
            text: text.into(),
            activated: true,
            kind,
            level,
        }
    }

    pub fn add(text: impl Into<String>, level: StatementLevel) -> Self {
        Self::new(text, StatementKind::Add, level)
    }

    pub fn modify(text: impl Into<String>, level: StatementLevel) -> Self {
        Self::new(text, StatementKind::Modify, level)
    }

    pub fn drop(text: impl Into<String>, level: StatementLevel) -> Self {
        Self::new(text, StatementKind::Drop, level)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// A drop that would actually do something when executed
    pub fn is_destructive(&self) -> bool {
        self.kind == StatementKind::Drop && !self.is_empty()
    }

    /// Replace the text with its inert rendering and mark it deactivated
    pub fn deactivate(self, rendered: String) -> Self {
        Self {
            text: rendered,
            activated: false,
            ..self
        }
    }
}
