use crate::core::keep_ordered;
use crate::core::models::{AppEntry, BuildMode, EntryGraph};

/// Application bootstrap module, relative to the build context.
pub const APP_ENTRYPOINT: &str = "./entrypoint.js";

/// Name of the bundle the app bundle depends on.
pub const VENDOR_BUNDLE: &str = "vendor";

/// Build the two-bundle entry graph.
///
/// `vendor` carries the fixed third-party runtime, plus the hot-reload
/// runtime in development only. `app` always loads after `vendor`.
pub fn entry_graph(mode: BuildMode) -> EntryGraph {
    let is_development = mode.is_development();

    EntryGraph {
        app: AppEntry {
            import: APP_ENTRYPOINT.to_string(),
            depend_on: VENDOR_BUNDLE.to_string(),
        },
        vendor: keep_ordered(vec![
            (true, "react".to_string()),
            (true, "react-dom".to_string()),
            (is_development, "react-refresh/runtime".to_string()),
        ]),
    }
}
