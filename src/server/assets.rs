//! Embedded dashboard page

use crate::layout::LayoutOptions;
use crate::view::ViewModel;

const LAYOUT_OPTIONS_SLOT: &str = "<!--LAYOUT_OPTIONS-->";
const STATIC_VIEW_SLOT: &str = "/*STATIC_VIEW*/null";

/// Render the dashboard page. With `static_view` the page embeds that view
/// and never calls the API; without it the page drives the live server.
pub fn render_page(static_view: Option<&ViewModel>) -> String {
    let options: String = LayoutOptions::KNOWN
        .iter()
        .map(|(name, label)| format!("<option value=\"{}\">{}</option>", name, label))
        .collect();

    let embedded = static_view
        .and_then(|view| serde_json::to_string(view).ok())
        // Keep the JSON from closing the surrounding <script> element.
        .map(|json| json.replace("</", "<\\/"))
        .unwrap_or_else(|| "null".to_string());

    INDEX_HTML
        .replace(LAYOUT_OPTIONS_SLOT, &options)
        .replace(STATIC_VIEW_SLOT, &embedded)
}

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>depview - Dependency Graph</title>
    <script src="https://unpkg.com/cytoscape@3.30.2/dist/cytoscape.min.js"></script>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        html, body {
            width: 100%;
            height: 100%;
            overflow: hidden;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #1a1a2e;
            color: #eee;
            display: flex;
            flex-direction: column;
        }

        header {
            display: flex;
            align-items: center;
            gap: 20px;
            padding: 10px;
            margin: 10px;
            border: 2px solid #eb4897;
        }

        h1 {
            font-size: 1.4em;
            color: #eb4897;
        }

        header label {
            font-size: 0.9em;
        }

        header select {
            margin-left: 6px;
            background: #16213e;
            color: #eee;
            border: 1px solid #333;
            padding: 2px 6px;
        }

        #summary {
            margin-left: auto;
            font-size: 0.85em;
            color: #888;
        }

        #graph {
            flex: 1;
            background: #16213e;
        }

        #status {
            padding: 20px;
            font-size: 1.1em;
        }

        #status.error {
            color: #ff5e5b;
        }
    </style>
</head>
<body>
    <header>
        <h1>depview</h1>
        <label for="layout">Graph Layout:
            <select id="layout"><!--LAYOUT_OPTIONS--></select>
        </label>
        <label for="filter">Filter:
            <select id="filter">
                <option value="all">All</option>
                <option value="unit">Unit</option>
                <option value="container">Container</option>
            </select>
        </label>
        <label for="highlight">Highlight edges:
            <select id="highlight">
                <option value="none">None</option>
                <option value="membership">Membership</option>
                <option value="dependency">Dependency</option>
                <option value="hierarchy">Hierarchy</option>
            </select>
        </label>
        <span id="summary"></span>
    </header>

    <p id="status">Loading...</p>
    <div id="graph"></div>

    <script>
        const STATIC_VIEW = /*STATIC_VIEW*/null;

        let cy = null;
        let renderKey = null;
        let pollTimer = null;

        async function fetchView() {
            if (STATIC_VIEW) {
                return STATIC_VIEW;
            }
            const response = await fetch('/api/view');
            return response.json();
        }

        function setStatus(text, isError) {
            const status = document.getElementById('status');
            status.textContent = text;
            status.className = isError ? 'error' : '';
            status.style.display = text ? 'block' : 'none';
        }

        function syncControls(state) {
            document.getElementById('layout').value = state.layout;
            document.getElementById('filter').value = state.filter;
            document.getElementById('highlight').value = state.highlight;
        }

        function mount(view) {
            if (cy) {
                cy.destroy();
            }
            cy = cytoscape({
                container: document.getElementById('graph'),
                elements: view.elements,
                style: view.stylesheet,
                layout: view.layout,
            });
            renderKey = view.render_key;
        }

        function show(view) {
            if (view.status === 'loading') {
                setStatus('Loading...', false);
                return;
            }
            if (view.status === 'error') {
                setStatus(view.message, true);
                return;
            }

            setStatus('', false);
            syncControls(view.state);
            document.getElementById('summary').textContent =
                `${view.summary.nodes} nodes · ${view.summary.edges} edges`;

            // A new render key means new elements or layout: remount.
            // Otherwise only the stylesheet changed.
            if (cy === null || view.render_key !== renderKey) {
                mount(view);
            } else {
                cy.style(view.stylesheet);
            }
        }

        // At most one poll is pending, however often refresh is called.
        async function refresh() {
            clearTimeout(pollTimer);
            pollTimer = null;
            try {
                const view = await fetchView();
                show(view);
                if (view.status === 'loading' && !STATIC_VIEW && pollTimer === null) {
                    pollTimer = setTimeout(refresh, 1000);
                }
            } catch (err) {
                setStatus('Error loading data.', true);
            }
        }

        async function select(field, value) {
            const response = await fetch('/api/state', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ [field]: value }),
            });
            if (!response.ok) {
                const body = await response.json();
                setStatus(body.error, true);
                return;
            }
            await refresh();
        }

        for (const field of ['layout', 'filter', 'highlight']) {
            const control = document.getElementById(field);
            if (STATIC_VIEW) {
                control.disabled = true;
            } else {
                control.addEventListener('change', (e) => select(field, e.target.value));
            }
        }

        window.addEventListener('resize', () => {
            if (cy) {
                cy.resize();
            }
        });

        refresh();
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_page_has_no_embedded_view() {
        let page = render_page(None);
        assert!(page.contains("const STATIC_VIEW = null;"));
        assert!(page.contains("<option value=\"breadthfirst\">Breadthfirst</option>"));
        assert!(!page.contains(LAYOUT_OPTIONS_SLOT));
    }

    #[test]
    fn test_loading_poll_keeps_a_single_timer() {
        let page = render_page(None);
        assert_eq!(page.matches("setTimeout(").count(), 1);
        assert!(page.contains("pollTimer = setTimeout(refresh, 1000);"));
        assert!(page.contains("clearTimeout(pollTimer);"));
    }

    #[test]
    fn test_static_page_embeds_escaped_view() {
        let view = ViewModel::Error {
            message: "Error loading data. </script><script>alert(1)".into(),
        };
        let page = render_page(Some(&view));
        assert!(page.contains("\"status\":\"error\""));
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains("<\\/script>"));
    }
}
