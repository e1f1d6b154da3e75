//! Rendering configuration

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Modifier groups the declaration renderer can be told to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererModifier {
    /// `public`, `private`, ...
    Visibility,
    /// `final`, `open`, `abstract`, `sealed`
    Modality,
    /// `override`
    Override,
    /// Declaration annotations
    Annotations,
    /// `inner`
    Inner,
    /// `data`
    Data,
    /// `inline` on classes
    Inline,
    /// `expect`
    Expect,
    /// `actual`
    Actual,
    /// `const`
    Const,
    /// `lateinit`
    Lateinit,
    /// `fun` on interfaces
    Fun,
}

impl RendererModifier {
    /// Every modifier group
    pub const ALL: [Self; 12] = [
        Self::Visibility,
        Self::Modality,
        Self::Override,
        Self::Annotations,
        Self::Inner,
        Self::Data,
        Self::Inline,
        Self::Expect,
        Self::Actual,
        Self::Const,
        Self::Lateinit,
        Self::Fun,
    ];
}

/// Options of one rendering invocation
///
/// Deserializable with per-field defaults, so a host can embed it as a
/// table in its own configuration file:
///
/// ```toml
/// modifiers = ["visibility", "modality", "override"]
/// render_containing_declarations = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    /// Modifier groups to show
    pub modifiers: FxHashSet<RendererModifier>,
    /// Render members and bodies inside brace blocks
    pub render_containing_declarations: bool,
    /// Replace non-denotable return types by public approximations
    pub approximate_types: bool,
    /// Show `: Unit` return types
    pub unit_return_type_shown: bool,
    /// Render `private/*private to this*/` as `private`
    pub normalized_visibilities: bool,
    /// Omit package prefixes of class names
    pub short_qualified_names: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            modifiers: RendererModifier::ALL
                .into_iter()
                .filter(|modifier| *modifier != RendererModifier::Annotations)
                .collect(),
            render_containing_declarations: false,
            approximate_types: true,
            unit_return_type_shown: false,
            normalized_visibilities: false,
            short_qualified_names: false,
        }
    }
}

impl RendererOptions {
    /// Whether `modifier` is enabled
    pub fn has(&self, modifier: RendererModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Options with every modifier group enabled, annotations included
    #[must_use]
    pub fn everything() -> Self {
        Self {
            modifiers: RendererModifier::ALL.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Copy with `modifier` enabled
    #[must_use]
    pub fn with_modifier(mut self, modifier: RendererModifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    /// Copy with `modifier` disabled
    #[must_use]
    pub fn without_modifier(mut self, modifier: RendererModifier) -> Self {
        self.modifiers.remove(&modifier);
        self
    }

    /// Copy with nested block rendering switched on or off
    #[must_use]
    pub fn with_containing_declarations(mut self, enabled: bool) -> Self {
        self.render_containing_declarations = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hides_only_annotations() {
        let options = RendererOptions::default();
        assert!(!options.has(RendererModifier::Annotations));
        assert!(options.has(RendererModifier::Visibility));
        assert!(options.has(RendererModifier::Fun));
        assert!(options.approximate_types);
        assert!(!options.render_containing_declarations);
    }

    #[test]
    fn test_toml_table_uses_field_defaults() {
        let options: RendererOptions = toml::from_str(
            r#"
            modifiers = ["visibility", "override"]
            render_containing_declarations = true
            "#,
        )
        .unwrap();
        assert!(options.has(RendererModifier::Visibility));
        assert!(options.has(RendererModifier::Override));
        assert!(!options.has(RendererModifier::Modality));
        assert!(options.render_containing_declarations);
        assert!(options.approximate_types);
        assert!(!options.short_qualified_names);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let options: RendererOptions = toml::from_str("").unwrap();
        assert_eq!(options, RendererOptions::default());
    }
}
