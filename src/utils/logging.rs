use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter("rigger=info")
            .with_target(false)
            .init();
    }

    pub fn assemble_start(mode: &str, commit_sha: &str) {
        info!("🔧 Rigger - Configuration Assembly");
        info!("═══════════════════════════════════════");
        info!("🎯 Mode: {}", mode);
        info!("🔖 Commit: {}", commit_sha);
    }

    pub fn assemble_complete(plugin_count: usize, rule_count: usize, elapsed: std::time::Duration) {
        info!("");
        info!("📊 Assembly Statistics:");
        info!("  • Plugins kept: {}", plugin_count);
        info!("  • Module rules: {}", rule_count);
        info!("  • Assembly time: {:.2?}", elapsed);
        info!("");
        info!("✅ Configuration assembled");
    }

    pub fn cache_key(key: &str) {
        info!("🗄️  Cache partition: {}", key);
    }

    pub fn env_stub_created(path: &str) {
        info!("📄 env stub created: {}", path);
    }

    pub fn env_stub_removed(path: &str) {
        info!("🧹 env stub removed: {}", path);
    }

    pub fn config_written(path: &str) {
        info!("📦 Configuration written to {}", path);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
