//! Layout parameter bundles handed to Cytoscape.
//!
//! Every selection builds a fresh bundle from fixed defaults, so switching
//! from one layout to another never carries options across.

use serde::Serialize;
use std::f64::consts::PI;

pub const DEFAULT_LAYOUT: &str = "cose";

const EASING: &str = "ease-in-out";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LayoutOptions {
    Cose(CoseLayout),
    Grid(GridLayout),
    Circle(CircleLayout),
    Breadthfirst(BreadthfirstLayout),
    /// Unknown layout name; Cytoscape applies its own defaults.
    Fallback { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoseLayout {
    pub name: &'static str,
    pub fit: bool,
    pub padding: u32,
    pub node_repulsion: u64,
    pub ideal_edge_length: u32,
    pub node_overlap: u32,
    pub animate: bool,
    pub animation_duration: u32,
    pub animation_easing: &'static str,
    pub component_spacing: u32,
    pub edge_elasticity: u32,
    pub randomize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub name: &'static str,
    pub fit: bool,
    pub padding: u32,
    pub avoid_overlap: bool,
    pub avoid_overlap_padding: u32,
    pub animate: bool,
    pub animation_duration: u32,
    pub edge_elasticity: u32,
    pub animation_easing: &'static str,
    pub cond_distance: u32,
}

/// `radius`, `sweep` and `sort` are left unset so Cytoscape derives them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleLayout {
    pub name: &'static str,
    pub fit: bool,
    pub padding: u32,
    pub avoid_overlap: bool,
    pub start_angle: f64,
    pub clockwise: bool,
    pub animate: bool,
    pub animation_duration: u32,
    pub edge_elasticity: u32,
    pub animation_easing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadthfirstLayout {
    pub name: &'static str,
    pub fit: bool,
    pub directed: bool,
    pub padding: u32,
    pub circle: bool,
    pub grid: bool,
    pub spacing_factor: f64,
    pub avoid_overlap: bool,
    pub node_dimensions_include_labels: bool,
    pub animate: bool,
    pub animation_duration: u32,
    pub edge_elasticity: u32,
    pub maximal: bool,
}

impl LayoutOptions {
    /// Layout names the dashboard offers, with their display labels.
    pub const KNOWN: [(&'static str, &'static str); 4] = [
        ("cose", "COSE"),
        ("grid", "Grid"),
        ("circle", "Circle"),
        ("breadthfirst", "Breadthfirst"),
    ];

    pub fn for_name(name: &str) -> Self {
        match name {
            "cose" => LayoutOptions::Cose(CoseLayout {
                name: "cose",
                fit: true,
                padding: 100,
                node_repulsion: 10_000_000,
                ideal_edge_length: 500,
                node_overlap: 3,
                animate: true,
                animation_duration: 500,
                animation_easing: EASING,
                component_spacing: 500,
                edge_elasticity: 200,
                randomize: false,
            }),
            "grid" => LayoutOptions::Grid(GridLayout {
                name: "grid",
                fit: true,
                padding: 100,
                avoid_overlap: true,
                avoid_overlap_padding: 500,
                animate: true,
                animation_duration: 1500,
                edge_elasticity: 200,
                animation_easing: EASING,
                cond_distance: 100,
            }),
            "circle" => LayoutOptions::Circle(CircleLayout {
                name: "circle",
                fit: true,
                padding: 10,
                avoid_overlap: true,
                start_angle: 1.5 * PI,
                clockwise: true,
                animate: true,
                animation_duration: 2000,
                edge_elasticity: 200,
                animation_easing: EASING,
            }),
            "breadthfirst" => LayoutOptions::Breadthfirst(BreadthfirstLayout {
                name: "breadthfirst",
                fit: true,
                directed: true,
                padding: 30,
                circle: false,
                grid: false,
                spacing_factor: 0.8,
                avoid_overlap: true,
                node_dimensions_include_labels: true,
                animate: true,
                animation_duration: 1500,
                edge_elasticity: 200,
                maximal: true,
            }),
            other => LayoutOptions::Fallback {
                name: other.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LayoutOptions::Cose(l) => l.name,
            LayoutOptions::Grid(l) => l.name,
            LayoutOptions::Circle(l) => l.name,
            LayoutOptions::Breadthfirst(l) => l.name,
            LayoutOptions::Fallback { name } => name,
        }
    }

    pub fn is_known(name: &str) -> bool {
        Self::KNOWN.iter().any(|(known, _)| *known == name)
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::for_name(DEFAULT_LAYOUT)
    }
}
