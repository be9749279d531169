use std::collections::{BTreeMap, BTreeSet};

use crate::fonts::registry::FontRegistry;
use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::overlay::object::OverlayObject;

/// A font the renderer should have available before text geometry runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontRequest {
    pub family: String,
    /// Asset to fetch; `None` means "render with system substitution".
    pub url: Option<String>,
}

/// Collaborator that fetches font bytes (network, bundle, disk).
pub trait FontLoader {
    fn fetch(&self, url: &str) -> SceneloomResult<Vec<u8>>;
}

/// In-memory loader for tests and offline embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryFontLoader {
    fonts: BTreeMap<String, Vec<u8>>,
}

impl MemoryFontLoader {
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.fonts.insert(url.into(), bytes);
    }
}

impl FontLoader for MemoryFontLoader {
    fn fetch(&self, url: &str) -> SceneloomResult<Vec<u8>> {
        self.fonts
            .get(url)
            .cloned()
            .ok_or_else(|| SceneloomError::font(format!("no font bytes for url '{url}'")))
    }
}

/// Resolves families to loadable assets and tracks which are ready.
///
/// Readiness matters for ordering: the controller calls
/// [`FontResolver::ensure_loaded`] before geometry decode so text metrics
/// never come from a half-loaded font. A family that fails to load degrades
/// to system substitution and is logged, never fatal.
pub struct FontResolver {
    registry: FontRegistry,
    font_ctx: parley::FontContext,
    loaded: BTreeSet<String>,
}

impl FontResolver {
    pub fn new(registry: FontRegistry) -> Self {
        Self {
            registry,
            font_ctx: parley::FontContext::default(),
            loaded: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Collect one request per distinct family referenced by `objects`.
    ///
    /// An explicit `fontUrl` on any object using the family wins over the
    /// registry; an unknown family yields a request with no URL.
    pub fn resolve(&self, objects: &[OverlayObject]) -> Vec<FontRequest> {
        let mut seen = BTreeSet::new();
        let mut requests = Vec::new();
        for obj in objects {
            let family = obj.font_family.trim();
            if family.is_empty() || !seen.insert(family.to_lowercase()) {
                continue;
            }
            let explicit = objects.iter().find_map(|o| {
                (o.font_family.eq_ignore_ascii_case(family))
                    .then(|| o.font_url.clone())
                    .flatten()
            });
            requests.push(self.request_for(family, explicit.as_deref()));
        }
        requests
    }

    /// Build the request for a single family.
    pub fn request_for(&self, family: &str, explicit_url: Option<&str>) -> FontRequest {
        let url = explicit_url
            .map(str::to_string)
            .or_else(|| self.registry.lookup(family).map(|e| e.url.clone()));
        FontRequest {
            family: family.to_string(),
            url,
        }
    }

    /// Fetch and register every requested font, then record readiness.
    ///
    /// Returns how many families became ready in this call. Failures degrade
    /// that family to system substitution; the batch never aborts.
    pub fn ensure_loaded(&mut self, requests: &[FontRequest], loader: &dyn FontLoader) -> usize {
        let mut newly_loaded = 0;
        for request in requests {
            let key = request.family.to_lowercase();
            if self.loaded.contains(&key) {
                continue;
            }
            let Some(url) = request.url.as_deref() else {
                tracing::debug!(
                    family = %request.family,
                    "no asset for family; relying on system substitution"
                );
                continue;
            };
            match self.load_one(&request.family, url, loader) {
                Ok(()) => {
                    self.loaded.insert(key);
                    newly_loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        family = %request.family,
                        url,
                        error = %err,
                        "font load failed; falling back to system substitution"
                    );
                }
            }
        }
        newly_loaded
    }

    /// True once `ensure_loaded` registered this family.
    pub fn is_loaded(&self, family: &str) -> bool {
        self.loaded.contains(&family.to_lowercase())
    }

    fn load_one(
        &mut self,
        family: &str,
        url: &str,
        loader: &dyn FontLoader,
    ) -> SceneloomResult<()> {
        let bytes = loader.fetch(url)?;
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SceneloomError::font("no font families registered from font bytes"))?;
        let registered = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneloomError::font("registered font family has no name"))?;
        if !registered.eq_ignore_ascii_case(family) {
            tracing::debug!(
                requested = family,
                registered,
                "font asset registered under a different family name"
            );
        }
        Ok(())
    }
}
