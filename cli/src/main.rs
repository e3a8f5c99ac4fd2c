use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use flipgrid_core::{CellCount, ContentRef, Coord, Coord2, FlipGrid, GridConfig, Region};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::renderer::TextRenderer;
use crate::wall::{PhotoWall, WallPlan, WallStats};

mod renderer;
mod wall;

/// Group size given as `COLSxROWS`, e.g. `2x1`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct GroupSize(Coord2);

impl FromStr for GroupSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((cols, rows)) = s.split_once(['x', 'X']) else {
            bail!("expected COLSxROWS, got {s:?}");
        };
        let cols: Coord = cols.trim().parse().context("invalid column count")?;
        let rows: Coord = rows.trim().parse().context("invalid row count")?;
        if cols == 0 || rows == 0 {
            bail!("group size must be at least 1x1");
        }
        Ok(Self((cols, rows)))
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Flip photos onto a grid of tiles", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of columns in the grid
    #[arg(long, default_value_t = 8)]
    cols: Coord,

    /// Number of rows in the grid
    #[arg(long, default_value_t = 6)]
    rows: Coord,

    /// Width and height of one cell, in pixels
    #[arg(long, default_value_t = 64.0)]
    cell_size: f32,

    /// JSON grid config; replaces --cols, --rows and --cell-size
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of flips to perform
    #[arg(long, default_value_t = 24)]
    steps: u32,

    /// Group sizes to place, used in turn
    #[arg(short, long = "group", default_values = ["2x2", "1x1", "2x1", "1x2"])]
    groups: Vec<GroupSize>,

    /// Clear a random group every N steps (0 never clears)
    #[arg(long, default_value_t = 0)]
    clear_every: u32,

    /// Prefix of the generated content names
    #[arg(long, default_value = "photo")]
    content_prefix: String,

    /// Prefer empty spots before flipping over existing groups
    #[arg(long)]
    unoccupied_first: bool,

    /// Print a JSON summary after the grid
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct GroupSummary<'a> {
    region: Region,
    content: &'a ContentRef,
}

#[derive(Serialize)]
struct Summary<'a> {
    config: GridConfig,
    seed: Option<u64>,
    stats: WallStats,
    occupied: CellCount,
    cells_flipped: u64,
    groups: Vec<GroupSummary<'a>>,
}

fn load_config(path: &Path) -> anyhow::Result<GridConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let config: GridConfig = serde_json::from_str(&text)
        .with_context(|| format!("could not parse grid config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GridConfig::new((args.cols, args.rows), args.cell_size)?,
    };
    let grid = FlipGrid::new(config)?;
    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let plan = WallPlan {
        groups: args.groups.iter().map(|group| group.0).collect(),
        clear_every: args.clear_every,
        content_prefix: args.content_prefix.clone(),
        unoccupied_first: args.unoccupied_first,
    };

    let mut renderer = TextRenderer::new(config.size);
    let mut wall = PhotoWall::new(grid, rng, plan)?;
    let stats = wall.run(args.steps, &mut renderer)?;
    wall.grid()
        .validate()
        .context("grid ended up with inconsistent groups")?;

    print!("{renderer}");
    if args.json {
        let summary = Summary {
            config,
            seed: args.seed,
            stats,
            occupied: wall.grid().occupied_count(),
            cells_flipped: renderer.cells_flipped(),
            groups: wall
                .grid()
                .groups()
                .map(|(region, content)| GroupSummary { region, content })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn default_groups_are_parsed() {
        let args = Args::try_parse_from(["flipgrid"]).unwrap();

        let groups: Vec<_> = args.groups.iter().map(|group| group.0).collect();
        assert_eq!(groups, vec![(2, 2), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn group_flags_replace_defaults() {
        let args = Args::try_parse_from(["flipgrid", "-g", "3x1", "--group", "1X4"]).unwrap();

        assert_eq!(args.groups, vec![GroupSize((3, 1)), GroupSize((1, 4))]);
    }

    #[test]
    fn group_size_rejects_garbage() {
        assert!("2".parse::<GroupSize>().is_err());
        assert!("0x3".parse::<GroupSize>().is_err());
        assert!("ax2".parse::<GroupSize>().is_err());
    }

    #[test]
    fn config_file_is_validated() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("flipgrid-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "size": [0, 3], "cell_size": 10.0 }"#).unwrap();

        let result = load_config(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
