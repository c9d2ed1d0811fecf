use crate::core::models::{BuildMode, OutputConfig};

/// Build output directory, relative to the project root.
pub const BUILD_DIR: &str = "dist";

/// Content-fingerprint placeholder resolved by the external tool from
/// emitted output content, never from wall-clock time.
pub const FINGERPRINT: &str = "[contenthash:8]";

/// Select the output filename template set for the given mode.
///
/// Production templates carry a fingerprint segment for long-term
/// caching; development templates use stable names for fast incremental
/// rebuilds. Every template is prefixed by the commit segment so
/// parallel deployments never collide.
pub fn output_config(mode: BuildMode, commit_sha: &str) -> OutputConfig {
    let is_production = mode.is_production();

    let (filename, chunk_filename, asset_module_filename, css_filename, css_chunk_filename) =
        if is_production {
            (
                format!("{commit_sha}/assets/js/[name].{FINGERPRINT}.js"),
                format!("{commit_sha}/assets/js/[name]-{FINGERPRINT}.chunk.js"),
                format!("{commit_sha}/assets/media/[name]-{FINGERPRINT}[ext]"),
                format!("{commit_sha}/assets/css/[name]-{FINGERPRINT}.css"),
                format!("{commit_sha}/assets/css/[id]-{FINGERPRINT}.chunk.css"),
            )
        } else {
            (
                format!("{commit_sha}/assets/js/[name].js"),
                format!("{commit_sha}/assets/js/[name].chunk.js"),
                format!("{commit_sha}/assets/media/[name][ext]"),
                format!("{commit_sha}/assets/css/[name].css"),
                format!("{commit_sha}/assets/css/[id].chunk.css"),
            )
        };

    OutputConfig {
        path: BUILD_DIR.to_string(),
        pathinfo: mode.is_development(),
        filename,
        chunk_filename,
        asset_module_filename,
        css_filename,
        css_chunk_filename,
        public_path: "/".to_string(),
    }
}

/// Filename template for media assets emitted through the module rules.
pub fn media_filename(mode: BuildMode, commit_sha: &str) -> String {
    if mode.is_production() {
        format!("{commit_sha}/assets/media/[name]-{FINGERPRINT}[ext][query]")
    } else {
        format!("{commit_sha}/assets/media/[name][ext][query]")
    }
}
