use core::fmt;

use serde::Serialize;

/// Lifecycle of one configuration in a set.
///
/// ```text
/// Unconfigured -> Generating | Loading -> Validated -> Active
///                        \                   \
///                         +-> Rejected <------+
/// ```
///
/// `Active` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigState {
    /// Registered, nothing produced yet.
    Unconfigured,
    /// The generator is building the table.
    Generating,
    /// A literal or provided table is being loaded.
    Loading,
    /// The table passed every invariant.
    Validated,
    /// The table was handed out for use.
    Active,
    /// Generation or validation failed.
    Rejected,
}

impl ConfigState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Active | Self::Rejected)
    }

    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unconfigured, Self::Generating | Self::Loading | Self::Rejected)
                | (Self::Generating | Self::Loading, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Active | Self::Rejected)
        )
    }

    /// Moves to `next`.
    pub(crate) fn advance(&mut self, next: Self) {
        debug_assert!(
            self.can_advance_to(next),
            "illegal configuration transition {self} -> {next}"
        );
        *self = next;
    }
}

impl fmt::Display for ConfigState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unconfigured => "unconfigured",
            Self::Generating => "generating",
            Self::Loading => "loading",
            Self::Validated => "validated",
            Self::Active => "active",
            Self::Rejected => "rejected",
        })
    }
}
