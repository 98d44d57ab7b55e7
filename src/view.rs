//! Dashboard view state and the payload rendered from it.

use crate::layout::{DEFAULT_LAYOUT, LayoutOptions};
use crate::query::FetchState;
use crate::selection::{EdgeHighlight, NodeFilter, ParseSelectionError};
use crate::stylesheet::{self, StyleRule};
use crate::transform::{ElementSummary, Elements, TransformOptions, build_elements};
use serde::{Deserialize, Serialize};

/// Message shown when the graph request failed.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data.";

/// The three independent selections of the dashboard.
///
/// `render_key` changes whenever the graph must be laid out again from
/// scratch (a new layout or filter). The page remounts the renderer when it
/// sees a new key. Highlight changes keep the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub layout: String,
    pub filter: NodeFilter,
    pub highlight: EdgeHighlight,
    pub render_key: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            filter: NodeFilter::All,
            highlight: EdgeHighlight::None,
            render_key: 0,
        }
    }
}

/// What a state change requires of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewChange {
    None,
    /// Only the stylesheet changed.
    Restyle,
    /// Elements or layout changed; remount and lay out again.
    Relayout,
}

/// Requested selections, as sent by the page. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewUpdate {
    pub layout: Option<String>,
    pub filter: Option<String>,
    pub highlight: Option<String>,
}

impl ViewState {
    pub fn new(layout: impl Into<String>, filter: NodeFilter, highlight: EdgeHighlight) -> Self {
        Self {
            layout: layout.into(),
            filter,
            highlight,
            render_key: 0,
        }
    }

    pub fn set_layout(&mut self, layout: impl Into<String>) -> ViewChange {
        let layout = layout.into();
        if layout == self.layout {
            return ViewChange::None;
        }
        self.layout = layout;
        self.render_key += 1;
        ViewChange::Relayout
    }

    pub fn set_filter(&mut self, filter: NodeFilter) -> ViewChange {
        if filter == self.filter {
            return ViewChange::None;
        }
        self.filter = filter;
        self.render_key += 1;
        ViewChange::Relayout
    }

    pub fn set_highlight(&mut self, highlight: EdgeHighlight) -> ViewChange {
        if highlight == self.highlight {
            return ViewChange::None;
        }
        self.highlight = highlight;
        ViewChange::Restyle
    }

    /// Apply every field of `update`. Nothing changes if any field is invalid.
    /// A change in layout and filter together bumps `render_key` once.
    pub fn apply(&mut self, update: &ViewUpdate) -> Result<ViewChange, ParseSelectionError> {
        let filter = update
            .filter
            .as_deref()
            .map(str::parse::<NodeFilter>)
            .transpose()?;
        let highlight = update
            .highlight
            .as_deref()
            .map(str::parse::<EdgeHighlight>)
            .transpose()?;

        let key_before = self.render_key;
        let mut change = ViewChange::None;
        if let Some(layout) = &update.layout {
            change = change.max(self.set_layout(layout.trim()));
        }
        if let Some(filter) = filter {
            change = change.max(self.set_filter(filter));
        }
        if let Some(highlight) = highlight {
            change = change.max(self.set_highlight(highlight));
        }
        if self.render_key > key_before {
            self.render_key = key_before + 1;
        }
        Ok(change)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::for_name(&self.layout)
    }
}

/// Everything the page needs to draw the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewModel {
    Loading,
    Error {
        message: String,
    },
    Ready {
        elements: Elements,
        stylesheet: Vec<StyleRule>,
        layout: Box<LayoutOptions>,
        render_key: u64,
        summary: Box<ElementSummary>,
        state: ViewState,
    },
}

impl ViewModel {
    pub fn compose(fetch: &FetchState, state: &ViewState, options: &TransformOptions) -> Self {
        match fetch {
            FetchState::Loading => ViewModel::Loading,
            FetchState::Failed(cause) => ViewModel::Error {
                message: format!("{} {}", LOAD_ERROR_MESSAGE, cause),
            },
            FetchState::Ready(graph) => {
                let elements = build_elements(graph, state.filter, options);
                let summary = elements.summary();
                ViewModel::Ready {
                    elements,
                    stylesheet: stylesheet::build(state.highlight),
                    layout: Box::new(state.layout_options()),
                    render_key: state.render_key,
                    summary: Box::new(summary),
                    state: state.clone(),
                }
            }
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ViewModel::Loading => "loading",
            ViewModel::Error { .. } => "error",
            ViewModel::Ready { .. } => "ready",
        }
    }
}
