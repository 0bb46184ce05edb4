//! Generator registry
//!
//! Maps unique generator names to factories. Built once at startup, shared
//! read-only behind `Arc` by every request handler; each lookup constructs
//! a fresh instance so no generator state outlives its request.

use super::{Generator, UiGroup};
use std::collections::BTreeMap;

/// Factory producing a fresh generator instance
pub type GeneratorFactory = fn() -> Box<dyn Generator>;

/// Registry entry: menu metadata snapshot plus the factory
pub struct GeneratorEntry {
    name: String,
    summary: String,
    description: Option<String>,
    group: UiGroup,
    hidden: bool,
    factory: GeneratorFactory,
}

impl GeneratorEntry {
    fn new(name: impl Into<String>, factory: GeneratorFactory) -> Self {
        let name = name.into();
        let probe = factory();
        Self {
            summary: probe.summary().to_string(),
            description: probe.description().map(|d| d.to_string()),
            group: probe.ui_group(),
            hidden: probe.hidden(),
            name,
            factory,
        }
    }

    /// URL path segment and registry key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line summary
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Longer description, when the generator has one
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Menu section
    pub fn group(&self) -> UiGroup {
        self.group
    }

    /// Excluded from menu and JSON index
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Construct the per-request instance
    pub fn instantiate(&self) -> Box<dyn Generator> {
        (self.factory)()
    }
}

impl std::fmt::Debug for GeneratorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorEntry")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Name → generator map, iterated in name order
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, GeneratorEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator under `name`.
    ///
    /// Names become URL path segments, so they are restricted to ASCII
    /// alphanumerics and underscores and must be unique.
    pub fn register(&mut self, name: &str, factory: GeneratorFactory) {
        assert!(
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "generator name {:?} is not URL-safe",
            name
        );
        let previous = self.entries.insert(name.to_string(), GeneratorEntry::new(name, factory));
        assert!(previous.is_none(), "duplicate generator name {:?}", name);
    }

    /// Look up an entry by exact name
    pub fn get(&self, name: &str) -> Option<&GeneratorEntry> {
        self.entries.get(name)
    }

    /// Number of registered generators, hidden ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &GeneratorEntry> {
        self.entries.values()
    }

    /// Visible entries in name order
    pub fn visible(&self) -> impl Iterator<Item = &GeneratorEntry> {
        self.entries.values().filter(|e| !e.hidden())
    }

    /// Visible entries grouped by menu section, sections in display order,
    /// entries in name order; empty sections omitted.
    pub fn by_group(&self) -> Vec<(UiGroup, Vec<&GeneratorEntry>)> {
        UiGroup::all()
            .iter()
            .filter_map(|&group| {
                let members: Vec<&GeneratorEntry> =
                    self.visible().filter(|e| e.group() == group).collect();
                if members.is_empty() {
                    None
                } else {
                    Some((group, members))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{ArgGroup, ParsedArgs};
    use crate::generator::{default_group, Result};
    use crate::render::Document;

    struct Fixed {
        groups: Vec<ArgGroup>,
        group: UiGroup,
        hidden: bool,
    }

    impl Fixed {
        fn boxed(group: UiGroup, hidden: bool) -> Box<dyn Generator> {
            Box::new(Self {
                groups: vec![default_group()],
                group,
                hidden,
            })
        }
    }

    impl Generator for Fixed {
        fn summary(&self) -> &'static str {
            "a fixture"
        }
        fn ui_group(&self) -> UiGroup {
            self.group
        }
        fn hidden(&self) -> bool {
            self.hidden
        }
        fn arg_groups(&self) -> &[ArgGroup] {
            &self.groups
        }
        fn render(&self, _: &ParsedArgs, doc: &mut Document) -> Result<()> {
            doc.rect(0.0, 0.0, 1.0, 1.0);
            Ok(())
        }
    }

    fn visible_tray() -> Box<dyn Generator> {
        Fixed::boxed(UiGroup::Trays, false)
    }
    fn visible_box() -> Box<dyn Generator> {
        Fixed::boxed(UiGroup::Boxes, false)
    }
    fn hidden_misc() -> Box<dyn Generator> {
        Fixed::boxed(UiGroup::Misc, true)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register("TrayA", visible_tray);
        registry.register("BoxA", visible_box);

        assert_eq!(registry.len(), 2);
        assert!(registry.get("TrayA").is_some());
        assert!(registry.get("traya").is_none(), "lookup is case-sensitive");
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let mut registry = Registry::new();
        registry.register("Zed", visible_tray);
        registry.register("Alpha", visible_box);

        let names: Vec<&str> = registry.entries().map(|e| e.name()).collect();
        assert_eq!(names, ["Alpha", "Zed"]);
    }

    #[test]
    fn test_hidden_excluded_from_visible() {
        let mut registry = Registry::new();
        registry.register("Shown", visible_box);
        registry.register("Secret", hidden_misc);

        let visible: Vec<&str> = registry.visible().map(|e| e.name()).collect();
        assert_eq!(visible, ["Shown"]);
        // still reachable by direct lookup
        assert!(registry.get("Secret").is_some());
    }

    #[test]
    fn test_by_group_ordering() {
        let mut registry = Registry::new();
        registry.register("TrayA", visible_tray);
        registry.register("BoxB", visible_box);
        registry.register("BoxA", visible_box);
        registry.register("Secret", hidden_misc);

        let grouped = registry.by_group();
        assert_eq!(grouped.len(), 2, "empty and hidden-only sections omitted");
        assert_eq!(grouped[0].0, UiGroup::Boxes);
        let box_names: Vec<&str> = grouped[0].1.iter().map(|e| e.name()).collect();
        assert_eq!(box_names, ["BoxA", "BoxB"]);
        assert_eq!(grouped[1].0, UiGroup::Trays);
    }

    #[test]
    fn test_instantiate_is_fresh_per_call() {
        let mut registry = Registry::new();
        registry.register("BoxA", visible_box);
        let entry = registry.get("BoxA").unwrap();
        let a = entry.instantiate();
        let b = entry.instantiate();
        assert!(!std::ptr::eq(a.as_ref(), b.as_ref()));
    }

    #[test]
    #[should_panic(expected = "duplicate generator name")]
    fn test_duplicate_name_panics() {
        let mut registry = Registry::new();
        registry.register("BoxA", visible_box);
        registry.register("BoxA", visible_box);
    }

    #[test]
    #[should_panic(expected = "not URL-safe")]
    fn test_unsafe_name_panics() {
        let mut registry = Registry::new();
        registry.register("Box/A", visible_box);
    }

    #[test]
    fn test_entry_metadata_snapshot() {
        let mut registry = Registry::new();
        registry.register("TrayA", visible_tray);
        let entry = registry.get("TrayA").unwrap();
        assert_eq!(entry.summary(), "a fixture");
        assert_eq!(entry.group(), UiGroup::Trays);
        assert!(!entry.hidden());
        assert!(entry.description().is_none());
    }
}
