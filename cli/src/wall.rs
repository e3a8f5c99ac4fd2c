use anyhow::ensure;
use flipgrid_core::{
    self as grid, CellCount, ContentRef, Coord2, FlipGrid, Region, Renderer, TargetFilter,
    UniformSource, pick_from,
};
use serde::Serialize;

/// How the wall picks what to flip at each step.
#[derive(Clone, Debug)]
pub(crate) struct WallPlan {
    /// Group sizes placed round-robin.
    pub groups: Vec<Coord2>,
    /// Every n-th step clears a random group instead; 0 never clears.
    pub clear_every: u32,
    pub content_prefix: String,
    /// Prefer spots that are empty before covering existing groups.
    pub unoccupied_first: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum StepOutcome {
    Placed { size: Coord2 },
    Cleared { region: Region },
    NoRoom { size: Coord2 },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct WallStats {
    pub placed: u32,
    pub cleared: u32,
    pub no_room: u32,
    pub cells_covered: CellCount,
    pub cells_cleared: CellCount,
}

impl WallStats {
    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Placed { size } => {
                self.placed = self.placed.saturating_add(1);
                let area = Region::new((0, 0), size).area();
                self.cells_covered = self.cells_covered.saturating_add(area);
            }
            StepOutcome::Cleared { region } => {
                self.cleared = self.cleared.saturating_add(1);
                self.cells_cleared = self.cells_cleared.saturating_add(region.area());
            }
            StepOutcome::NoRoom { .. } => self.no_room = self.no_room.saturating_add(1),
        }
    }
}

/// Keeps flipping photos onto a grid, the way a photo wall cycles its pictures.
pub(crate) struct PhotoWall<U> {
    grid: FlipGrid,
    rng: U,
    plan: WallPlan,
}

impl<U: UniformSource> PhotoWall<U> {
    pub(crate) fn new(grid: FlipGrid, rng: U, plan: WallPlan) -> anyhow::Result<Self> {
        ensure!(!plan.groups.is_empty(), "at least one group size is needed");
        Ok(Self { grid, rng, plan })
    }

    pub(crate) fn grid(&self) -> &FlipGrid {
        &self.grid
    }

    pub(crate) fn step<R: Renderer>(
        &mut self,
        index: u32,
        renderer: &mut R,
    ) -> grid::Result<StepOutcome> {
        if self.plan.clear_every > 0 && (index + 1) % self.plan.clear_every == 0 {
            let regions: Vec<Region> = self.grid.groups().map(|(region, _)| region).collect();
            if let Some(&region) = pick_from(&mut self.rng, &regions) {
                self.grid.clear(region, renderer)?;
                log::info!("step {index}: cleared {region}");
                return Ok(StepOutcome::Cleared { region });
            }
        }

        let size = self.plan.groups[index as usize % self.plan.groups.len()];
        let content = ContentRef::new(format!("{}-{index:03}.png", self.plan.content_prefix));

        let mut placed = false;
        if self.plan.unoccupied_first {
            placed = self.grid.flip_random(
                size,
                Some(content.clone()),
                TargetFilter::UnoccupiedOnly,
                &mut self.rng,
                renderer,
            )?;
        }
        if !placed {
            placed = self.grid.flip_random(
                size,
                Some(content.clone()),
                TargetFilter::AnyCell,
                &mut self.rng,
                renderer,
            )?;
        }

        if placed {
            log::info!("step {index}: placed {} ({}x{})", content, size.0, size.1);
            Ok(StepOutcome::Placed { size })
        } else {
            log::warn!("step {index}: no room for a {}x{} group", size.0, size.1);
            Ok(StepOutcome::NoRoom { size })
        }
    }

    pub(crate) fn run<R: Renderer>(
        &mut self,
        steps: u32,
        renderer: &mut R,
    ) -> grid::Result<WallStats> {
        let mut stats = WallStats::default();
        for index in 0..steps {
            let outcome = self.step(index, renderer)?;
            stats.record(outcome);
        }
        Ok(stats)
    }
}
