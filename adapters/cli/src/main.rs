#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Wayfarer adventure client.

mod config;
mod script;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wayfarer_core::GAME_TITLE;
use wayfarer_rendering::{Color, Presentation, RenderingBackend};
use wayfarer_rendering_macroquad::MacroquadBackend;

use crate::{
    config::WayfarerConfig,
    script::{run_script, ScriptAction},
    simulation::Simulation,
};

/// Command-line arguments for the Wayfarer client.
#[derive(Debug, Parser)]
#[command(name = "wayfarer", version, about = "Turn-based adventure map client")]
struct Args {
    /// TOML configuration file; missing keys fall back to defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Edge length of a map tile in world units
    #[arg(long, value_name = "UNITS")]
    tile_length: Option<f32>,

    /// Number of tile columns on the adventure map
    #[arg(long, value_name = "COUNT")]
    columns: Option<u32>,

    /// Number of tile rows on the adventure map
    #[arg(long, value_name = "COUNT")]
    rows: Option<u32>,

    /// Column of the hero's starting tile
    #[arg(long, value_name = "COLUMN", allow_negative_numbers = true)]
    start_column: Option<i32>,

    /// Row of the hero's starting tile
    #[arg(long, value_name = "ROW", allow_negative_numbers = true)]
    start_row: Option<i32>,

    /// Movement points the hero regains every turn
    #[arg(long, value_name = "POINTS")]
    max_movement: Option<u32>,

    /// Display name of the hero
    #[arg(long, value_name = "NAME")]
    hero_name: Option<String>,

    /// Skip the splash and title menu and start on the adventure map
    #[arg(long)]
    skip_intro: bool,

    /// Vertical sync mode for the window
    #[arg(long, value_enum, value_name = "MODE")]
    vsync: Option<VsyncMode>,

    /// Replay `--action` steps without opening a window
    #[arg(long)]
    headless: bool,

    /// Headless step: click:COLUMN,ROW, select, confirm, cancel or end-turn
    #[arg(long = "action", value_name = "ACTION", requires = "headless")]
    actions: Vec<ScriptAction>,

    /// Output format of headless step reports
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum VsyncMode {
    /// Synchronise presentation with the display refresh rate
    On,
    /// Present frames as fast as possible
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum ReportFormat {
    /// One human-readable line per step
    Text,
    /// One JSON object per line
    Json,
}

impl Args {
    fn resolve_config(&self) -> Result<WayfarerConfig> {
        let mut config = match &self.config {
            Some(path) => WayfarerConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => WayfarerConfig::default(),
        };

        if let Some(tile_length) = self.tile_length {
            config.tile_length = tile_length;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(start_column) = self.start_column {
            config.start_column = start_column;
        }
        if let Some(start_row) = self.start_row {
            config.start_row = start_row;
        }
        if let Some(max_movement) = self.max_movement {
            config.max_movement = max_movement;
        }
        if let Some(hero_name) = &self.hero_name {
            config.hero_name.clone_from(hero_name);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Entry point for the Wayfarer command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    info!(
        columns = config.columns,
        rows = config.rows,
        tile_length = config.tile_length,
        max_movement = config.max_movement,
        "configuration loaded"
    );

    if args.headless {
        run_headless(&config, &args.actions, args.format)
    } else {
        run_window(&config, &args)
    }
}

fn run_headless(
    config: &WayfarerConfig,
    actions: &[ScriptAction],
    format: ReportFormat,
) -> Result<()> {
    let mut simulation = Simulation::new(config, true).context("failed to build adventure map")?;
    for report in run_script(&mut simulation, actions) {
        match format {
            ReportFormat::Text => println!("{report}"),
            ReportFormat::Json => println!(
                "{}",
                serde_json::to_string(&report).context("failed to encode step report")?
            ),
        }
    }
    Ok(())
}

fn run_window(config: &WayfarerConfig, args: &Args) -> Result<()> {
    let mut simulation =
        Simulation::new(config, args.skip_intro).context("failed to build adventure map")?;
    let presentation = Presentation::new(
        GAME_TITLE,
        Color::from_rgb_u8(0, 0, 0),
        simulation.build_scene(),
    );

    let mut backend = MacroquadBackend::new();
    if let Some(mode) = args.vsync {
        backend = backend.with_vsync(mode == VsyncMode::On);
    }

    info!(scene = ?simulation.scene_kind(), "opening window");
    backend.run(presentation, move |dt, input, scene| {
        simulation.update(dt, input, scene);
    })
}
