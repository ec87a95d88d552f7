//! Derivation rules shared by the compiler, validator and planner

use crate::model::{AssetConfig, AssetGroup, Manifest};

/// Aspect ratio used when neither the asset nor its group sets one
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Relative file path of an asset: `category/[subcategory/]name.format`
///
/// Generated `src` values and on-disk existence checks must both go through
/// this function so they agree.
pub fn asset_relative_path(group: &AssetGroup, asset_name: &str) -> String {
    let category = group.category.as_deref().unwrap_or_default();
    let format = group.format.as_deref().unwrap_or_default();
    let file_name = format!("{}.{}", asset_name, format);

    match group.subcategory.as_deref().filter(|s| !s.is_empty()) {
        Some(subcategory) => format!("{}/{}/{}", category, subcategory, file_name),
        None => format!("{}/{}", category, file_name),
    }
}

/// Asset value, else group value, else `1:1`
pub fn resolve_aspect_ratio<'a>(group: &'a AssetGroup, asset: &'a AssetConfig) -> &'a str {
    asset
        .aspect_ratio()
        .or_else(|| group.aspect_ratio.as_deref().filter(|v| !v.is_empty()))
        .unwrap_or(DEFAULT_ASPECT_RATIO)
}

/// `ui_icons` -> `uiIcons`, `hero-image` -> `heroImage`
///
/// Each `_` or `-` is dropped and the character after it upper-cased. A
/// separator consumes the next character even if that is another separator.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c == '_' || c == '-' {
            match chars.next() {
                Some(next) => out.extend(next.to_uppercase()),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether `name` can stand as a bare JavaScript identifier
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Total number of assets across all groups
pub fn count_assets(manifest: &Manifest) -> usize {
    manifest.groups().iter().map(|g| g.assets.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon_group(subcategory: Option<&str>) -> AssetGroup {
        AssetGroup {
            category: Some("icons".to_string()),
            subcategory: subcategory.map(str::to_string),
            format: Some("png".to_string()),
            ..AssetGroup::new("ui_icons")
        }
    }

    #[test]
    fn test_path_without_subcategory() {
        assert_eq!(asset_relative_path(&icon_group(None), "icon_a"), "icons/icon_a.png");
    }

    #[test]
    fn test_path_with_subcategory() {
        assert_eq!(
            asset_relative_path(&icon_group(Some("nav")), "icon_a"),
            "icons/nav/icon_a.png"
        );
    }

    #[test]
    fn test_empty_subcategory_is_absent() {
        assert_eq!(asset_relative_path(&icon_group(Some("")), "icon_a"), "icons/icon_a.png");
    }

    #[test]
    fn test_aspect_ratio_resolution() {
        let mut group = icon_group(None);
        group.aspect_ratio = Some("1:1".to_string());
        let asset =
            AssetConfig::new("wide", "a wide banner", "Banner").with_field("aspect_ratio", "16:9");
        assert_eq!(resolve_aspect_ratio(&group, &asset), "16:9");

        let plain = AssetConfig::new("plain", "a plain icon", "Plain");
        group.aspect_ratio = Some("4:3".to_string());
        assert_eq!(resolve_aspect_ratio(&group, &plain), "4:3");

        group.aspect_ratio = None;
        assert_eq!(resolve_aspect_ratio(&group, &plain), "1:1");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("ui_icons"), "uiIcons");
        assert_eq!(to_camel_case("hero-image"), "heroImage");
        assert_eq!(to_camel_case("plain"), "plain");
        assert_eq!(to_camel_case("main_hero_image"), "mainHeroImage");
    }

    #[test]
    fn test_camel_case_separator_edges() {
        assert_eq!(to_camel_case("a__b"), "a_b");
        assert_eq!(to_camel_case("trailing_"), "trailing_");
        assert_eq!(to_camel_case("icon_2x"), "icon2x");
    }

    #[test]
    fn test_js_identifier() {
        assert!(is_js_identifier("uiIcons"));
        assert!(is_js_identifier("_meta"));
        assert!(is_js_identifier("$el"));
        assert!(!is_js_identifier("404Icons"));
        assert!(!is_js_identifier("icon.large"));
        assert!(!is_js_identifier(""));
    }

    #[test]
    fn test_count_assets() {
        let mut first = icon_group(None);
        first.assets.push(AssetConfig::new("a", "prompt a", "A"));
        first.assets.push(AssetConfig::new("b", "prompt b", "B"));
        let mut second = AssetGroup::new("photos");
        second.assets.push(AssetConfig::new("c", "prompt c", "C"));

        let manifest = Manifest {
            assets: Some(vec![first, second]),
            ..Default::default()
        };
        assert_eq!(count_assets(&manifest), 3);
        assert_eq!(count_assets(&Manifest::default()), 0);
    }
}
