/// Family used when an object or command does not pick one.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// One resolvable entry in the bundled font registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontEntry {
    /// Family name as shown in the editor ("Playfair Display").
    pub family: String,
    /// Postscript-style name some scene records carry instead of the family.
    pub postscript_name: String,
    /// Loadable asset URL.
    pub url: String,
}

/// Maps family or postscript names to loadable font assets.
///
/// Lookups are case-insensitive on both names. Families absent from the
/// registry render with system substitution; that is a supported degraded
/// mode, not an error.
#[derive(Clone, Debug, Default)]
pub struct FontRegistry {
    entries: Vec<FontEntry>,
}

impl FontRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The families bundled with the editor.
    pub fn builtin() -> Self {
        let table = [
            ("Inter", "Inter-Regular"),
            ("Roboto", "Roboto-Regular"),
            ("Montserrat", "Montserrat-Regular"),
            ("Oswald", "Oswald-Regular"),
            ("Poppins", "Poppins-Regular"),
            ("Nunito", "Nunito-Regular"),
            ("Playfair Display", "PlayfairDisplay-Regular"),
            ("Bebas Neue", "BebasNeue-Regular"),
            ("Lobster", "Lobster-Regular"),
        ];
        let entries = table
            .into_iter()
            .map(|(family, postscript)| FontEntry {
                family: family.to_string(),
                postscript_name: postscript.to_string(),
                url: format!("https://cdn.sceneloom.app/fonts/{postscript}.ttf"),
            })
            .collect();
        Self { entries }
    }

    pub fn register(&mut self, entry: FontEntry) {
        self.entries.push(entry);
    }

    /// Find an entry by family name or postscript name.
    pub fn lookup(&self, name: &str) -> Option<&FontEntry> {
        self.entries.iter().find(|e| {
            e.family.eq_ignore_ascii_case(name) || e.postscript_name.eq_ignore_ascii_case(name)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_family_and_postscript_names() {
        let registry = FontRegistry::builtin();
        let by_family = registry.lookup("playfair display").unwrap();
        let by_postscript = registry.lookup("PLAYFAIRDISPLAY-REGULAR").unwrap();
        assert_eq!(by_family, by_postscript);
        assert!(by_family.url.ends_with("PlayfairDisplay-Regular.ttf"));
    }

    #[test]
    fn unknown_family_resolves_to_none() {
        assert!(FontRegistry::builtin().lookup("Comic Sans MS").is_none());
        assert!(FontRegistry::empty().lookup(DEFAULT_FONT_FAMILY).is_none());
    }

    #[test]
    fn registered_entries_are_found() {
        let mut registry = FontRegistry::empty();
        registry.register(FontEntry {
            family: "Custom".to_string(),
            postscript_name: "Custom-Bold".to_string(),
            url: "https://example.test/custom.ttf".to_string(),
        });
        assert!(registry.lookup("custom").is_some());
    }
}
