//! Visibility, modality and modifier flags of declarations

use serde::{Deserialize, Serialize};

/// Declared visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Visible everywhere
    #[default]
    Public,
    /// Visible inside the module
    Internal,
    /// Visible to subclasses
    Protected,
    /// Visible inside the containing scope
    Private,
    /// Private and accessible only through `this`
    PrivateToThis,
    /// Local to a callable body
    Local,
}

impl Visibility {
    /// Collapses visibilities that only differ in compiler bookkeeping
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::PrivateToThis => Self::Private,
            other => other,
        }
    }

    /// Text used when the visibility is rendered as a modifier
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::PrivateToThis => "private/*private to this*/",
            Self::Local => "local",
        }
    }
}

/// Inheritance modality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Cannot be overridden or subclassed
    Final,
    /// Closed hierarchy
    Sealed,
    /// Can be overridden or subclassed
    Open,
    /// Must be overridden or subclassed
    Abstract,
}

impl Modality {
    /// Modifier keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Sealed => "sealed",
            Self::Open => "open",
            Self::Abstract => "abstract",
        }
    }
}

/// A boolean modifier keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// `inline`
    Inline,
    /// `operator`
    Operator,
    /// `infix`
    Infix,
    /// `suspend`
    Suspend,
    /// `tailrec`
    Tailrec,
    /// `const`
    Const,
    /// `lateinit`
    Lateinit,
    /// `external`
    External,
    /// `expect`
    Expect,
    /// `actual`
    Actual,
    /// `vararg`
    Vararg,
    /// `crossinline`
    Crossinline,
    /// `noinline`
    Noinline,
    /// `inner`
    Inner,
    /// `data`
    Data,
    /// `fun`
    Fun,
}

/// Set of [`Modifier`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers(u32);

impl Modifiers {
    /// No modifiers
    pub const fn empty() -> Self {
        Self(0)
    }

    const fn bit(modifier: Modifier) -> u32 {
        1 << modifier as u32
    }

    /// Whether `modifier` is present
    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & Self::bit(modifier) != 0
    }

    /// Adds `modifier`
    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= Self::bit(modifier);
    }

    /// Removes `modifier`
    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !Self::bit(modifier);
    }

    /// Copy of the set with `modifier` added
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Resolved status shared by member declarations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationStatus {
    /// Declared or inferred visibility
    pub visibility: Visibility,
    /// Resolved modality; callables may have none recorded
    pub modality: Option<Modality>,
    /// Boolean modifier flags
    pub modifiers: Modifiers,
    /// Whether the originating syntax carries the `override` keyword
    pub has_override_keyword: bool,
}

impl DeclarationStatus {
    /// Whether the modality is `abstract`
    pub fn is_abstract(&self) -> bool {
        self.modality == Some(Modality::Abstract)
    }

    /// Whether `modifier` is set
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_set() {
        let mut modifiers: Modifiers = [Modifier::Inline, Modifier::Suspend].into_iter().collect();
        assert!(modifiers.contains(Modifier::Inline));
        assert!(modifiers.contains(Modifier::Suspend));
        assert!(!modifiers.contains(Modifier::Fun));
        modifiers.remove(Modifier::Inline);
        assert!(!modifiers.contains(Modifier::Inline));
        assert!(Modifiers::empty().with(Modifier::Fun).contains(Modifier::Fun));
    }

    #[test]
    fn test_visibility_normalization() {
        assert_eq!(Visibility::PrivateToThis.normalize(), Visibility::Private);
        assert_eq!(Visibility::Internal.normalize(), Visibility::Internal);
        assert_eq!(Visibility::PrivateToThis.display_name(), "private/*private to this*/");
    }
}
