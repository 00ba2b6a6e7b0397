//! File-type contract of the base-image, RPD and save dialogs.
//!
//! The filter strings built here are also the source phrases under which the
//! catalogs store their localized renderings, so they must stay byte-exact.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// Filter of the "Select RPD Information" dialog.
pub const ONTOLOGY_FILTER: &str = "Ontology files (*.owl)";
/// Filter preselected in the "Select Save Path" dialog.
pub const PNG_FILTER: &str = "Portable Network Graphics (*.png)";
/// Label of the combined group in the open dialog.
pub const ALL_SUPPORTED_LABEL: &str = "All supported formats";
/// Extension of RPD information files.
pub const ONTOLOGY_EXTENSION: &str = "owl";

const FILTER_SEPARATOR: &str = ";;";

/// A group of image extensions offered together in a file dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    WindowsBitmap,
    Jpeg,
    Jpeg2000,
    Png,
    PortableImage,
    SunRaster,
    Tiff,
}

impl ImageFormat {
    /// Groups in dialog order.
    pub const ALL: [ImageFormat; 7] = [
        ImageFormat::WindowsBitmap,
        ImageFormat::Jpeg,
        ImageFormat::Jpeg2000,
        ImageFormat::Png,
        ImageFormat::PortableImage,
        ImageFormat::SunRaster,
        ImageFormat::Tiff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::WindowsBitmap => "Windows bitmaps",
            ImageFormat::Jpeg => "JPEG files",
            ImageFormat::Jpeg2000 => "JPEG 2000 files",
            ImageFormat::Png => "Portable Network Graphics",
            ImageFormat::PortableImage => "Portable image format",
            ImageFormat::SunRaster => "Sun rasters",
            ImageFormat::Tiff => "TIFF files",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::WindowsBitmap => &["bmp", "dib"],
            ImageFormat::Jpeg => &["jpeg", "jpg", "jpe"],
            ImageFormat::Jpeg2000 => &["jp2"],
            ImageFormat::Png => &["png"],
            ImageFormat::PortableImage => &["pbm", "pgm", "ppm"],
            ImageFormat::SunRaster => &["sr", "ras"],
            ImageFormat::Tiff => &["tiff", "tif"],
        }
    }

    /// The group whose extensions include `ext` (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        ImageFormat::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// This group as one filter entry, e.g. `JPEG files (*.jpeg *.jpg *.jpe)`.
    pub fn filter(self) -> String {
        filter_entry(self.label(), self.extensions().iter().copied())
    }
}

/// Every image extension the dialogs accept.
pub static SUPPORTED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    ImageFormat::ALL
        .into_iter()
        .flat_map(|format| format.extensions().iter().copied())
        .collect()
});

fn filter_entry<'a>(label: &str, extensions: impl IntoIterator<Item = &'a str>) -> String {
    let patterns: Vec<String> = extensions
        .into_iter()
        .map(|ext| format!("*.{ext}"))
        .collect();
    format!("{label} ({})", patterns.join(" "))
}

/// Filter string of the base-image open dialog.
pub fn open_filter() -> String {
    let mut groups = vec![filter_entry(ALL_SUPPORTED_LABEL, SUPPORTED_EXTENSIONS.iter().copied())];
    groups.extend(ImageFormat::ALL.into_iter().map(ImageFormat::filter));
    groups.join(FILTER_SEPARATOR)
}

/// Filter string of the design save dialog.
pub fn save_filter() -> String {
    ImageFormat::ALL
        .into_iter()
        .map(ImageFormat::filter)
        .collect::<Vec<_>>()
        .join(FILTER_SEPARATOR)
}

/// One `label (*.a *.b)` group of a filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub label: String,
    pub extensions: Vec<String>,
}

impl FilterGroup {
    pub fn matches(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

static GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(.*?)\s*\(([^()]*)\)\s*$").unwrap());
static PATTERN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\.(\w+)").unwrap());

/// Splits a filter string (English or localized) into its groups.
///
/// Groups without a parenthesized pattern list are skipped.
pub fn parse_filter(filter: &str) -> Vec<FilterGroup> {
    filter
        .split(FILTER_SEPARATOR)
        .filter_map(|group| {
            let caps = GROUP_RE.captures(group)?;
            let extensions: Vec<String> = PATTERN_RE.captures_iter(&caps[2])
                .map(|m| m[1].to_ascii_lowercase())
                .collect();
            if extensions.is_empty() {
                return None;
            }
            Some(FilterGroup {
                label: caps[1].to_string(),
                extensions,
            })
        })
        .collect()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// The format group `path` belongs to, judged by its extension.
pub fn image_format_of(path: &Path) -> Option<ImageFormat> {
    extension_of(path).and_then(|ext| ImageFormat::from_extension(&ext))
}

/// Whether the base-image dialog would accept `path`.
pub fn is_supported_image(path: &Path) -> bool {
    image_format_of(path).is_some()
}

/// Whether `path` names an ontology (`.owl`) file.
pub fn is_ontology(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| ext == ONTOLOGY_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_follow_dialog_order() {
        assert_eq!(
            *SUPPORTED_EXTENSIONS,
            vec![
                "bmp", "dib", "jpeg", "jpg", "jpe", "jp2", "png",
                "pbm", "pgm", "ppm", "sr", "ras", "tiff", "tif"
            ]
        );
    }

    #[test]
    fn open_filter_starts_with_all_supported_group() {
        assert!(
            open_filter().starts_with(
                "All supported formats (*.bmp *.dib *.jpeg *.jpg *.jpe *.jp2 *.png *.pbm *.pgm *.ppm *.sr *.ras *.tiff *.tif);;Windows bitmaps (*.bmp *.dib);;"
            )
        );
        assert!(open_filter().ends_with(&save_filter()));
    }

    #[test]
    fn png_group_matches_png_filter_constant() {
        assert_eq!(ImageFormat::Png.filter(), PNG_FILTER);
    }

    #[test]
    fn parse_open_filter_recovers_groups() {
        let groups = parse_filter(&open_filter());
        assert_eq!(groups.len(), 8);
        assert_eq!(groups[0].label, ALL_SUPPORTED_LABEL);
        assert_eq!(groups[0].extensions, *SUPPORTED_EXTENSIONS);
        assert_eq!(groups[3].label, "JPEG 2000 files");
        assert_eq!(groups[3].extensions, vec!["jp2"]);
    }

    #[test]
    fn parse_localized_filter() {
        let groups = parse_filter("本体文件 (*.owl)");
        assert_eq!(groups, vec![FilterGroup {
            label: "本体文件".to_string(),
            extensions: vec!["owl".to_string()],
        }]);
    }

    #[test]
    fn parse_skips_malformed_groups() {
        let groups = parse_filter("Broken;;Images (*.png);;Nothing ()");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Images");
    }

    #[test]
    fn extension_checks_are_case_insensitive() {
        assert!(is_supported_image(Path::new("scan.TIF")));
        assert!(is_supported_image(Path::new("/tmp/base.jpe")));
        assert!(!is_supported_image(Path::new("base.gif")));
        assert!(!is_supported_image(Path::new("no_extension")));
        assert!(is_ontology(Path::new("rpd.OWL")));
        assert!(!is_ontology(Path::new("rpd.rdf")));
    }

    #[test]
    fn from_extension_finds_group() {
        assert_eq!(ImageFormat::from_extension("PGM"), Some(ImageFormat::PortableImage));
        assert_eq!(ImageFormat::from_extension("webp"), None);
    }

    #[test]
    fn image_format_of_path() {
        assert_eq!(image_format_of(Path::new("/scans/base.JPG")), Some(ImageFormat::Jpeg));
        assert_eq!(image_format_of(Path::new("design.ras")), Some(ImageFormat::SunRaster));
        assert_eq!(image_format_of(Path::new("rpd.owl")), None);
        assert_eq!(image_format_of(Path::new("README")), None);
    }

    #[test]
    fn every_supported_extension_is_accepted() {
        for ext in SUPPORTED_EXTENSIONS.iter() {
            let path = format!("base.{}", ext.to_ascii_uppercase());
            assert!(is_supported_image(Path::new(&path)), "{path} rejected");
        }
    }

    #[test]
    fn filter_group_matches_path() {
        let groups = parse_filter(&save_filter());
        let tiff = groups.iter().find(|g| g.label == "TIFF files").unwrap();
        assert!(tiff.matches(Path::new("design.tiff")));
        assert!(!tiff.matches(Path::new("design.png")));
    }
}
