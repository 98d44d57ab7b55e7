//! Cytoscape stylesheet: visual encodings for node categories and edge kinds.

use crate::model::{EdgeKind, NodeCategory};
use crate::selection::EdgeHighlight;
use serde::Serialize;
use serde_json::{Map, Value, json};

pub const HIGHLIGHT_COLOR: &str = "#ff5e5b";
const BASE_EDGE_COLOR: &str = "#64e0ff";
const DIMMED_OPACITY: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    #[serde(rename = "background-color")]
    pub background_color: &'static str,
    pub shape: &'static str,
}

impl NodeStyle {
    pub fn for_category(category: &NodeCategory) -> Self {
        match category {
            NodeCategory::Container => NodeStyle {
                background_color: "#82ff8f",
                shape: "triangle",
            },
            NodeCategory::Unit => NodeStyle {
                background_color: "#eb4897",
                shape: "ellipse",
            },
            NodeCategory::Other(_) => NodeStyle {
                background_color: "#9e9e9e",
                shape: "round-rectangle",
            },
        }
    }
}

pub fn edge_color(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Dependency => BASE_EDGE_COLOR,
        EdgeKind::Membership => "#b388ff",
        EdgeKind::Hierarchy => "#ffd166",
    }
}

/// One `{ selector, style }` entry of a Cytoscape stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub style: Map<String, Value>,
}

impl StyleRule {
    fn new(selector: impl Into<String>, style: Value) -> Self {
        let style = match style {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            selector: selector.into(),
            style,
        }
    }
}

/// Build the stylesheet. Only the trailing highlight rules depend on
/// `highlight`, so changing it restyles edges without touching layout.
pub fn build(highlight: EdgeHighlight) -> Vec<StyleRule> {
    // Categories without a class rule of their own fall back to this look.
    let fallback = NodeStyle::for_category(&NodeCategory::Other(String::new()));

    let mut rules = vec![
        StyleRule::new(
            "node",
            json!({
                "label": "data(name)",
                "color": "#ffffff",
                "text-valign": "center",
                "text-halign": "center",
                "background-color": fallback.background_color,
                "shape": fallback.shape,
            }),
        ),
        StyleRule::new("node[padding]", json!({ "padding": "data(padding)" })),
        StyleRule::new(
            "edge",
            json!({
                "width": "data(width)",
                "line-color": BASE_EDGE_COLOR,
                "curve-style": "bezier",
                "target-arrow-shape": "triangle",
                "target-arrow-color": BASE_EDGE_COLOR,
            }),
        ),
    ];

    for category in [NodeCategory::Unit, NodeCategory::Container] {
        let style = NodeStyle::for_category(&category);
        rules.push(StyleRule::new(
            format!(".{}", category.as_str()),
            json!(style),
        ));
    }

    for kind in EdgeKind::ALL {
        let color = edge_color(kind);
        rules.push(StyleRule::new(
            format!("edge.{}", kind.as_str()),
            json!({ "line-color": color, "target-arrow-color": color }),
        ));
    }

    if let Some(kind) = highlight.kind() {
        rules.push(StyleRule::new(
            format!("edge[kind != \"{}\"]", kind.as_str()),
            json!({ "opacity": DIMMED_OPACITY }),
        ));
        rules.push(StyleRule::new(
            format!("edge.{}", kind.as_str()),
            json!({
                "line-color": HIGHLIGHT_COLOR,
                "target-arrow-color": HIGHLIGHT_COLOR,
                "opacity": 1,
                "z-index": 10,
            }),
        ));
    }

    rules
}
