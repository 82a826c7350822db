//! The display loop: owns the monitor, the config watcher and the renderer,
//! and prints one frame per sampled tick.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sysmon_config::{ConfigWatcher, SysmonConfig};
use sysmon_core::{AppState, Message};
use sysmon_renderer::Renderer;
use sysmon_system::{spawn_monitor, Monitor, Sampler};
use sysmon_theme::Theme;
use tracing::{debug, info, warn};

use crate::cli::Args;

pub struct App {
    args:        Args,
    config_path: PathBuf,
    config:      SysmonConfig,
    renderer:    Renderer,
    monitor:     Option<Monitor>,
}

impl App {
    pub fn new(args: Args, config_path: PathBuf) -> Self {
        let config = load_config(&config_path, &args);
        let renderer = renderer_for(&config);
        Self {
            args,
            config_path,
            config,
            renderer,
            monitor: None,
        }
    }

    /// Sample a baseline, wait one interval and print a single frame.
    pub async fn once(&self) -> Result<()> {
        let mut sampler = Sampler::host(&self.config);
        sampler.prime();
        tokio::time::sleep(self.config.general.interval()).await;

        let mut state = AppState::new(self.config.general.history_len());
        state.apply(sampler.sample());
        self.print(&state)
    }

    /// Run until Ctrl-C.
    pub async fn run(mut self) -> Result<()> {
        let sampler = Sampler::host(&self.config);
        let (monitor, mut samples) = spawn_monitor(
            sampler,
            self.config.general.interval(),
            self.config.general.history_len(),
        );
        self.monitor = Some(monitor);

        let (watcher, mut changes) = ConfigWatcher::spawn(&self.config_path);
        debug!("config file: {}", watcher.path().display());

        info!(
            "sampling every {} ms, mode {:?}",
            self.config.general.interval().as_millis(),
            self.config.display.mode
        );

        loop {
            let msg = tokio::select! {
                state = samples.recv() => match state {
                    Some(state) => Message::Sampled(Box::new(state)),
                    None => Message::Shutdown, // monitor task ended
                },
                Some(()) = changes.recv() => Message::ConfigReloaded,
                _ = tokio::signal::ctrl_c() => Message::Shutdown,
            };
            if !self.handle(msg)? {
                break;
            }
        }

        if let Some(monitor) = self.monitor.take() {
            monitor.stop().await;
        }
        info!("sysmon stopped");
        Ok(())
    }

    /// Returns `false` once the loop should end.
    fn handle(&mut self, msg: Message) -> Result<bool> {
        match msg {
            Message::Sampled(state) => self.print(&state)?,
            Message::ConfigReloaded => self.reload(),
            Message::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    fn reload(&mut self) {
        let mut config = match sysmon_config::load(&self.config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };
        self.args.apply(&mut config);

        if config.general.history_len() != self.config.general.history_len() {
            warn!("history_len changes take effect after a restart");
        }
        if let Some(monitor) = &self.monitor {
            monitor.set_interval(config.general.interval());
        }
        self.renderer = renderer_for(&config);
        self.config = config;
        info!("Config reloaded");
    }

    fn print(&self, state: &AppState) -> Result<()> {
        let frame = self.renderer.render(state).context("rendering frame")?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{frame}")?;
        if self.renderer.mode() == sysmon_config::DisplayMode::Detail {
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn load_config(path: &Path, args: &Args) -> SysmonConfig {
    let mut config = sysmon_config::load(path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        SysmonConfig::default()
    });
    args.apply(&mut config);
    debug!("effective config: {config:?}");
    config
}

fn renderer_for(config: &SysmonConfig) -> Renderer {
    Renderer::new(&config.display, Theme::from_config(&config.theme))
}
