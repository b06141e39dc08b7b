use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::glyph::GlyphKind;

/// Category name to glyph assignment for one session.
///
/// [`GlyphRegistry::build`] is the primary path: categories are sorted and the
/// i-th one gets `GLYPH_SET[i % 50]`, so the mapping does not depend on row order.
/// Categories first seen through [`GlyphRegistry::glyph_for`] take the next
/// free slot instead.
#[derive(Debug, Clone, Default)]
pub struct GlyphRegistry {
    assignments: HashMap<String, GlyphKind>,
    next_index: usize,
}

impl GlyphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry built from `categories`, see [`GlyphRegistry::build`].
    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        registry.build(categories);
        registry
    }

    /// Replace every assignment with the sorted-order mapping of `categories`.
    /// Duplicates count once.
    pub fn build<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = categories
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        sorted.sort_by(|a, b| locale_cmp(a, b));
        sorted.dedup();

        self.assignments.clear();
        for (i, category) in sorted.into_iter().enumerate() {
            self.assignments.insert(category, GlyphKind::nth(i));
        }
        self.next_index = self.assignments.len();
    }

    /// Glyph for `category`, assigning the next free slot if it has none yet.
    pub fn glyph_for(&mut self, category: &str) -> GlyphKind {
        if let Some(&kind) = self.assignments.get(category) {
            return kind;
        }
        let kind = GlyphKind::nth(self.next_index);
        self.next_index += 1;
        self.assignments.insert(category.to_string(), kind);
        kind
    }

    /// Lookup without assigning.
    pub fn get(&self, category: &str) -> Option<GlyphKind> {
        self.assignments.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Collation close to a browser's default `localeCompare`, compared level by
/// level: base letters with accents and case folded away, then accents, then
/// case (lowercase first), then raw bytes.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Lowercased base characters: `"Éruption"` and `"eruption"` share a key.
fn primary_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased decomposition with the marks kept; unaccented sorts first.
fn accent_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPH_SET;

    #[test]
    fn build_is_independent_of_insertion_order() {
        let a = GlyphRegistry::from_categories(["Stratovolcano", "Caldera", "Shield volcano"]);
        let b = GlyphRegistry::from_categories(["Shield volcano", "Stratovolcano", "Caldera"]);
        for category in ["Stratovolcano", "Caldera", "Shield volcano"] {
            assert_eq!(a.get(category), b.get(category));
        }
        assert_eq!(a.get("Caldera"), Some(GlyphKind::Circle));
        assert_eq!(a.get("Shield volcano"), Some(GlyphKind::Ring));
        assert_eq!(a.get("Stratovolcano"), Some(GlyphKind::Target));
    }

    #[test]
    fn sort_ignores_case_first() {
        let r = GlyphRegistry::from_categories(["b", "A", "a", "C"]);
        assert_eq!(r.get("a"), Some(GLYPH_SET[0]));
        assert_eq!(r.get("A"), Some(GLYPH_SET[1]));
        assert_eq!(r.get("b"), Some(GLYPH_SET[2]));
        assert_eq!(r.get("C"), Some(GLYPH_SET[3]));
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(locale_cmp("Édifice", "Fissure"), Ordering::Less);
        assert_eq!(locale_cmp("Éruption", "Erosion"), Ordering::Greater);
        assert_eq!(locale_cmp("cote", "côte"), Ordering::Less);
        assert_eq!(locale_cmp("côte", "Cote"), Ordering::Greater);
        assert_eq!(locale_cmp("Zone", "Éruption"), Ordering::Greater);
    }

    #[test]
    fn accented_category_keeps_its_alphabetical_slot() {
        let r = GlyphRegistry::from_categories(["Fissure vents", "Éruption fissurale", "Zone"]);
        assert_eq!(r.get("Éruption fissurale"), Some(GlyphKind::Circle));
        assert_eq!(r.get("Fissure vents"), Some(GlyphKind::Ring));
        assert_eq!(r.get("Zone"), Some(GlyphKind::Target));
    }

    #[test]
    fn assignment_wraps_after_fifty() {
        let names: Vec<String> = (0..52).map(|i| format!("type{i:02}")).collect();
        let r = GlyphRegistry::from_categories(&names);
        assert_eq!(r.get("type49"), Some(GlyphKind::Star4));
        assert_eq!(r.get("type50"), Some(GlyphKind::Circle));
        assert_eq!(r.get("type51"), Some(GlyphKind::Ring));
    }

    #[test]
    fn rebuild_replaces_previous_assignments() {
        let mut r = GlyphRegistry::from_categories(["x", "y"]);
        r.glyph_for("late");
        r.build(["y"]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("x"), None);
        assert_eq!(r.get("late"), None);
        assert_eq!(r.get("y"), Some(GlyphKind::Circle));
    }

    #[test]
    fn lazy_lookup_takes_next_slot_and_sticks() {
        let mut r = GlyphRegistry::from_categories(["Caldera", "Maar"]);
        let late = r.glyph_for("Submarine");
        assert_eq!(late, GLYPH_SET[2]);
        assert_eq!(r.glyph_for("Submarine"), late);
        assert_eq!(r.glyph_for("Unknown"), GLYPH_SET[3]);
        assert_eq!(r.glyph_for("Caldera"), GLYPH_SET[0]);
    }

    #[test]
    fn duplicates_count_once() {
        let r = GlyphRegistry::from_categories(["Maar", "Maar", "Caldera"]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("Maar"), Some(GLYPH_SET[1]));
    }
}
