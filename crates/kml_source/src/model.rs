use serde::{Deserialize, Serialize};

/// Raw KML tree, as close to the source markup as possible.
///
/// Every leaf is optional: a missing `<name>` or `<coordinates>` is not a
/// parse error here. Validation happens when the raw tree is lifted into
/// the typed document model.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Kml {
    pub document: KmlDocument,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct KmlDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub styles: Vec<Style>,
    pub style_maps: Vec<StyleMap>,
    pub folders: Vec<Folder>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Folder {
    pub name: Option<String>,
    // Direct children only; nested folders are flattened into the document list.
    pub placemarks: Vec<Placemark>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Placemark {
    pub name: Option<String>,
    pub description: Option<String>,
    pub style_url: Option<String>,
    /// Raw `<Point><coordinates>` text, e.g. `"139.7671,35.6812,0"`.
    pub coordinates: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Style {
    pub id: Option<String>,
    pub icon: Option<IconStyle>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IconStyle {
    /// `aabbggrr` hex string.
    pub color: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StyleMap {
    pub id: Option<String>,
    pub pairs: Vec<Pair>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pair {
    pub key: Option<String>,
    pub style_url: Option<String>,
}
