//! Icon registry for inline shortcodes like `:sword:`.

use std::collections::BTreeMap;

/// Default location of the bundled card icons.
pub const DEFAULT_ICON_BASE: &str = "/card-assets/icons";

/// Name of the icon used for spirit glyphs (`¤`, `§`, ...).
pub const SPIRIT_ICON: &str = "spirit";

/// Built-in icons: registry name and asset file stem.
const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("spirit", "spirit"),
    ("sword", "spirit_dot-danger"),
    ("fire", "fire"),
    ("skull", "skull"),
    ("shield", "shield"),
    ("bolt", "bolt"),
    ("heart", "heart"),
    ("spirit_trgico", "spirit_trgico"),
    ("spirit_hitico", "spirit_hitico"),
    ("spirit_ghitico", "spirit_ghitico"),
    ("spirit_misico", "spirit_misico"),
    ("spirit_compico", "spirit_compico"),
    ("spirit_resico", "spirit_resico"),
    ("spirit_fixico", "spirit_fixico"),
    ("spirit_heavico", "spirit_heavico"),
    ("spirit_medico", "spirit_medico"),
    ("spirit_lighico", "spirit_lighico"),
    ("spirit_zeroico", "spirit_zeroico"),
    ("spirit_weapico", "spirit_weapico"),
    ("spirit_envico", "spirit_envico"),
    ("spirit_socico", "spirit_socico"),
    ("spirit_expico", "spirit_expico"),
    ("spirit_puzico", "spirit_puzico"),
    ("spirit_hazico", "spirit_hazico"),
    ("spirit_trapico", "spirit_trapico"),
];

/// An icon's pair of interchangeable asset references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconAsset {
    /// Registry name (lowercase).
    pub name: String,
    /// Vector form, used on screen.
    pub vector: String,
    /// Raster form, swapped in for static export.
    pub raster: String,
}

impl IconAsset {
    /// Create an asset; the name is lowercased.
    pub fn new(name: &str, vector: impl Into<String>, raster: impl Into<String>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            vector: vector.into(),
            raster: raster.into(),
        }
    }

    /// Asset pair `<base>/<stem>.svg` and `<base>/<stem>.png`.
    pub fn from_stem(name: &str, base: &str, stem: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self::new(name, format!("{base}/{stem}.svg"), format!("{base}/{stem}.png"))
    }
}

/// Case-insensitive name to asset mapping.
///
/// Built once before formatting starts and only read afterwards.
///
/// # Example
///
/// ```
/// use spirit_format::IconRegistry;
///
/// let registry = IconRegistry::builtin();
/// let sword = registry.lookup("SWORD").unwrap();
/// assert_eq!(sword.vector, "/card-assets/icons/spirit_dot-danger.svg");
/// assert!(registry.lookup("unknownthing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct IconRegistry {
    icons: BTreeMap<String, IconAsset>,
}

impl IconRegistry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled icon set under [`DEFAULT_ICON_BASE`].
    #[must_use]
    pub fn builtin() -> Self {
        Self::with_base(DEFAULT_ICON_BASE)
    }

    /// The bundled icon set under another asset base.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let mut registry = Self::empty();
        for (name, stem) in BUILTIN_ICONS {
            registry.insert(IconAsset::from_stem(name, base, stem));
        }
        registry
    }

    /// Add or replace an icon.
    pub fn insert(&mut self, asset: IconAsset) {
        self.icons.insert(asset.name.clone(), asset);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_icon(mut self, asset: IconAsset) -> Self {
        self.insert(asset);
        self
    }

    /// Find an icon by name, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&IconAsset> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.icons.get(&name.to_ascii_lowercase())
        } else {
            self.icons.get(name)
        }
    }

    /// All icons in name order.
    pub fn iter(&self) -> impl Iterator<Item = &IconAsset> {
        self.icons.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Check that a name can be written as a shortcode: an ASCII letter
/// followed by 1 to 32 letters, digits, underscores or hyphens.
#[must_use]
pub fn is_valid_icon_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    first.is_ascii_alphabetic()
        && (1..=32).contains(&rest.len())
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
