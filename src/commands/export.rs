use crate::api::{DepviewError, compose_view, fetch_graph};
use crate::cli::{ExportArgs, ExportFormat};
use crate::fs::{FileSystem, default_fs};
use crate::server::render_page;
use crate::style;
use crate::view::ViewModel;
use std::path::Path;

use super::CommandContext;

pub fn cmd_export(args: ExportArgs) -> i32 {
    cmd_export_with_fs(args, default_fs())
}

pub fn cmd_export_with_fs(args: ExportArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.source, &args.view) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            style::error(&format!("Failed to create tokio runtime: {}", e));
            return 1;
        }
    };

    let source = &ctx.config.source;
    style::status(&format!(
        "Fetching project {} version {} from {}",
        source.project_id,
        source.version_id,
        style::url(&source.endpoint)
    ));

    let graph = match rt.block_on(fetch_graph(source)) {
        Ok(graph) => graph,
        Err(e) => {
            style::error(&format!("Failed to load dependency graph: {}", e));
            return 1;
        }
    };

    let view = compose_view(&graph, &ctx.view, &ctx.transform_options());
    if let Err(e) = write_view(&view, args.format, &args.output, fs) {
        style::error(&format!("Failed to write export file: {}", e));
        return 1;
    }

    style::success(&format!("View exported to: {}", style::path(&args.output)));
    if let ViewModel::Ready { summary, .. } = &view {
        style::element_summary(summary);
    }
    0
}

/// Write `view` to `output` in the requested format.
pub(crate) fn write_view(
    view: &ViewModel,
    format: ExportFormat,
    output: &Path,
    fs: &dyn FileSystem,
) -> Result<(), DepviewError> {
    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(view)?,
        ExportFormat::Html => render_page(Some(view)),
    };
    fs.write(output, &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use crate::query::{FetchState, parse_response};
    use crate::transform::TransformOptions;
    use crate::view::ViewState;
    use std::sync::Arc;

    const FIXTURE: &str = include_str!("../../tests/fixtures/dependency_graph.json");

    fn ready_view() -> ViewModel {
        let graph = Arc::new(parse_response(FIXTURE.as_bytes()).unwrap());
        ViewModel::compose(
            &FetchState::Ready(graph),
            &ViewState::default(),
            &TransformOptions::default(),
        )
    }

    #[test]
    fn test_json_export() {
        let fs = MockFs::new();
        let path = Path::new("/out/view.json");
        write_view(&ready_view(), ExportFormat::Json, path, &fs).unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs.get(path).unwrap()).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["layout"]["name"], "cose");
        assert_eq!(json["elements"].as_array().unwrap().len(), 5 + 14);
    }

    #[test]
    fn test_html_export_embeds_view() {
        let fs = MockFs::new();
        let path = Path::new("/out/view.html");
        write_view(&ready_view(), ExportFormat::Html, path, &fs).unwrap();

        let html = fs.get(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("\"status\":\"ready\""));
        assert!(html.contains("\"node-10\""));
        assert!(!html.contains("const STATIC_VIEW = null;"));
    }
}
