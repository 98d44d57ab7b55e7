use crate::cli::ServeArgs;
use crate::query::GraphClient;
use crate::server::{self, AppState};
use crate::style;
use std::sync::Arc;

use super::CommandContext;

pub fn cmd_serve(args: ServeArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source, &args.view) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let source = &ctx.config.source;
    let port = args.port.unwrap_or(ctx.config.server.port);
    let open = args.open || ctx.config.server.open;

    let client = match GraphClient::new(source.endpoint.clone(), source.timeout()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            style::error(&format!("Failed to create HTTP client: {}", e));
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            style::error(&format!("Failed to create tokio runtime: {}", e));
            return 1;
        }
    };

    let state = Arc::new(AppState::new(ctx.view.clone(), ctx.transform_options()));

    style::status(&format!(
        "Loading project {} version {} from {}",
        source.project_id,
        source.version_id,
        style::url(&source.endpoint)
    ));

    let result = rt.block_on(async {
        tokio::spawn(server::load_graph(
            Arc::clone(&state),
            client,
            source.project_id,
            source.version_id.clone(),
        ));
        server::serve(state, port, open).await
    });

    if let Err(e) = result {
        style::error(&format!("Server failed: {}", e));
        return 1;
    }

    0
}
