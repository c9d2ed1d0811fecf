use crate::core::assembler::assemble;
use crate::core::models::{ArgMap, BuildMode, EnvMap};
use crate::infrastructure::{EnvStubManager, HookRegistry};
use crate::utils::{Logger, Result, RiggerError, Timer};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rigger")]
#[command(about = "Rigger - deterministic build configuration assembler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a build configuration and emit it as JSON
    Assemble {
        /// Build mode (development | production)
        #[arg(short, long, default_value = "production")]
        mode: String,
        /// Environment entries as KEY=VALUE (repeatable)
        #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
        /// Build arguments as KEY=VALUE (repeatable)
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
        arg: Vec<String>,
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Write the configuration to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Create/remove the env stub around emission (production only)
        #[arg(long)]
        manage_env_stub: bool,
    },
    /// Validate inputs and report what a build would use
    Check {
        /// Build mode (development | production)
        #[arg(short, long, default_value = "production")]
        mode: String,
        /// Environment entries as KEY=VALUE (repeatable)
        #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
        /// Build arguments as KEY=VALUE (repeatable)
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
        arg: Vec<String>,
    },
    /// Show assembler information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Assemble {
                mode,
                env,
                arg,
                root,
                out,
                manage_env_stub,
            } => {
                self.handle_assemble(&mode, &env, &arg, &root, out.as_deref(), manage_env_stub)
                    .await
            }
            Commands::Check { mode, env, arg } => self.handle_check(&mode, &env, &arg).await,
            Commands::Info => self.handle_info().await,
        }
    }

    async fn handle_assemble(
        &self,
        mode: &str,
        env_pairs: &[String],
        arg_pairs: &[String],
        root: &str,
        out: Option<&str>,
        manage_env_stub: bool,
    ) -> Result<()> {
        let timer = Timer::start("assemble");

        let mode: BuildMode = mode.parse()?;
        let env = parse_pairs(env_pairs)?;
        let argv = parse_pairs(arg_pairs)?;

        let mut hooks = HookRegistry::new();
        if manage_env_stub && mode.is_production() {
            let stub = Arc::new(Mutex::new(EnvStubManager::new(Path::new(root))));
            let pre = Arc::clone(&stub);
            hooks.register_pre(move || pre.lock().before_run().map(|_| ()));
            let post = Arc::clone(&stub);
            hooks.register_post(move || post.lock().after_run());
        }

        hooks.fire_pre()?;

        let config = assemble(mode, &env, &argv)?;
        Logger::assemble_start(&mode.to_string(), commit_label(&env));
        Logger::cache_key(&config.cache.version);

        let json = serde_json::to_string_pretty(&config)?;
        match out {
            Some(path) => {
                tokio::fs::write(path, &json).await?;
                Logger::config_written(path);
            }
            None => println!("{}", json),
        }

        hooks.fire_post()?;

        Logger::assemble_complete(
            config.plugins.len(),
            config.module.rules.len(),
            timer.elapsed(),
        );
        Ok(())
    }

    async fn handle_check(
        &self,
        mode: &str,
        env_pairs: &[String],
        arg_pairs: &[String],
    ) -> Result<()> {
        let mode: BuildMode = mode.parse()?;
        let env = parse_pairs(env_pairs)?;
        let argv = parse_pairs(arg_pairs)?;

        let config = assemble(mode, &env, &argv)?;

        Logger::assemble_start(&mode.to_string(), commit_label(&env));
        Logger::cache_key(&config.cache.version);
        Logger::info(&format!(
            "📦 Bundles: app (depends on {}), vendor [{}]",
            config.entry.app.depend_on,
            config.entry.vendor.join(", ")
        ));

        let plugin_names: Vec<&str> = config.plugins.iter().map(|p| p.name.as_str()).collect();
        Logger::info(&format!("🔌 Plugins kept: {}", plugin_names.join(", ")));

        if let Some(server) = &config.dev_server {
            let middleware: Vec<&str> =
                server.middleware.iter().map(|m| m.name.as_str()).collect();
            Logger::info(&format!(
                "🌐 Dev server on port {} with middleware: {}",
                server.port,
                middleware.join(" → ")
            ));
        }

        Logger::info("✅ Configuration is valid");
        Ok(())
    }

    async fn handle_info(&self) -> Result<()> {
        Logger::info("🔧 Rigger v0.1.0");
        Logger::info("══════════════════════════════════════");
        Logger::info("⚡ Deterministic build configuration assembler");
        Logger::info("");
        Logger::info("🎯 What it does:");
        Logger::info("  • Derives a full bundler configuration from (mode, env, argv)");
        Logger::info("  • Two-bundle entry graph: vendor + app");
        Logger::info("  • Mode-keyed output templates with content fingerprints");
        Logger::info("  • Stable, declaration-ordered plugin filtering");
        Logger::info("  • Order-independent cache partition keys");
        Logger::info("  • Production env-stub lifecycle management");
        Logger::info("");
        Logger::info("🚫 What it does not do:");
        Logger::info("  • No transpilation, bundling, minification or CSS processing");
        Logger::info("  • All transforms run in the external build executor");
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn commit_label(env: &EnvMap) -> &str {
    env.get(crate::core::assembler::COMMIT_SHA_KEY)
        .map(String::as_str)
        .unwrap_or(crate::core::assembler::DEFAULT_COMMIT_SHA)
}

/// Parse repeated KEY=VALUE flags into a canonical map. Later
/// duplicates override earlier ones, matching environment semantics.
fn parse_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = ArgMap::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            RiggerError::config(format!("expected KEY=VALUE, got {:?}", pair))
        })?;
        if key.is_empty() {
            return Err(RiggerError::config(format!("empty key in {:?}", pair)));
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}
