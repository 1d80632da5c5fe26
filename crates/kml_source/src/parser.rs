use roxmltree::{Document, Node};

use crate::model::*;
use crate::KmlError;

/// Parse KML text into the raw model.
pub fn parse_kml(text: &str) -> Result<Kml, KmlError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    // Both `<kml><Document>` and a bare `<Document>` root are accepted.
    let document = if root.tag_name().name() == "Document" {
        root
    } else {
        root.children()
            .find(|n| n.is_element() && n.tag_name().name() == "Document")
            .ok_or(KmlError::MissingDocument)?
    };

    Ok(Kml {
        document: parse_document(document),
    })
}

fn parse_document(node: Node) -> KmlDocument {
    let mut document = KmlDocument::default();

    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "name" => document.name = text_of(child),
            "description" => document.description = text_of(child),
            "Style" => document.styles.push(parse_style(child)),
            "StyleMap" => document.style_maps.push(parse_style_map(child)),
            "Folder" => collect_folders(child, &mut document.folders),
            _ => {}
        }
    }

    document
}

/// Push `node` and every folder nested inside it, in document order.
fn collect_folders(node: Node, out: &mut Vec<Folder>) {
    let mut folder = Folder::default();
    let mut nested = Vec::new();

    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "name" => folder.name = text_of(child),
            "Placemark" => folder.placemarks.push(parse_placemark(child)),
            "Folder" => nested.push(child),
            _ => {}
        }
    }

    out.push(folder);
    for child in nested {
        collect_folders(child, out);
    }
}

fn parse_placemark(node: Node) -> Placemark {
    let mut placemark = Placemark::default();

    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "name" => placemark.name = text_of(child),
            "description" => placemark.description = text_of(child),
            "styleUrl" => placemark.style_url = text_of(child),
            "Point" => {
                placemark.coordinates = child_element(child, "coordinates").and_then(text_of);
            }
            _ => {}
        }
    }

    placemark
}

fn parse_style(node: Node) -> Style {
    let id = node.attribute("id").map(|s| s.to_string());
    let icon = child_element(node, "IconStyle").map(|icon_style| IconStyle {
        color: child_element(icon_style, "color").and_then(text_of),
        href: child_element(icon_style, "Icon")
            .and_then(|icon| child_element(icon, "href"))
            .and_then(text_of),
    });
    Style { id, icon }
}

fn parse_style_map(node: Node) -> StyleMap {
    let id = node.attribute("id").map(|s| s.to_string());
    let mut pairs = Vec::new();

    for child in node.children() {
        if child.is_element() && child.tag_name().name() == "Pair" {
            pairs.push(Pair {
                key: child_element(child, "key").and_then(text_of),
                style_url: child_element(child, "styleUrl").and_then(text_of),
            });
        }
    }

    StyleMap { id, pairs }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Concatenated text of a node, CDATA included, trimmed. Empty text is `None`.
fn text_of(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
