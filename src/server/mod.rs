mod assets;
mod routes;

pub use assets::render_page;
pub use routes::{AppState, create_router, load_graph, serve};
