use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Which cells a candidate region may cover.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Occupied cells are fine as long as their groups are fully covered.
    #[default]
    AnyCell,
    /// Every covered cell must currently be empty.
    UnoccupiedOnly,
}

impl TargetFilter {
    pub const fn is_unoccupied_only(self) -> bool {
        matches!(self, Self::UnoccupiedOnly)
    }
}

/// Grid of flippable cells that tracks multi-cell groups without a group table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipGrid {
    config: GridConfig,
    store: CellStore,
}

impl FlipGrid {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let store = CellStore::new(config.size)?;
        Ok(Self { config, store })
    }

    pub fn with_size(cols: Coord, rows: Coord, cell_size: f32) -> Result<Self> {
        Self::new(GridConfig::new((cols, rows), cell_size)?)
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Raw store access. Writes that bypass [`FlipGrid::flip`] can break group
    /// consistency; run [`FlipGrid::validate`] afterwards.
    pub fn store_mut(&mut self) -> &mut CellStore {
        &mut self.store
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.store.get(Layer::Visible, coords)
    }

    pub fn hidden_cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.store.get(Layer::Hidden, coords)
    }

    pub fn occupied_count(&self) -> CellCount {
        self.store
            .iter(Layer::Visible)
            .filter(|(_, cell)| cell.is_occupied())
            .count() as CellCount
    }

    /// Whether `region` can be flipped without cutting through any existing group.
    pub fn is_available(&self, region: Region, filter: TargetFilter) -> bool {
        if region.is_empty() || !region.fits_within(self.size()) {
            return false;
        }

        let size_x = Span::from(region.size.0);
        let size_y = Span::from(region.size.1);
        region.cells().all(|(coords, (dx, dy))| {
            let cell = &self.store[(Layer::Visible, coords)];
            if filter.is_unoccupied_only() && cell.is_occupied() {
                return false;
            }

            // far edge of this cell's group, measured from the region's origin
            let edge_x = Span::from(dx) + cell.group_cols();
            let edge_y = Span::from(dy) + cell.group_rows();
            (0..=size_x).contains(&edge_x) && (0..=size_y).contains(&edge_y)
        })
    }

    /// Flips every cell of `region`, turning it into one group showing `content`,
    /// or back into ungrouped empty cells when `content` is `None`.
    ///
    /// Nothing is mutated unless the region is available.
    pub fn flip<R>(
        &mut self,
        region: Region,
        content: Option<ContentRef>,
        renderer: &mut R,
    ) -> Result<()>
    where
        R: Renderer + ?Sized,
    {
        if region.is_empty() {
            return Err(GridError::InvalidDimensions);
        }
        if !self.is_available(region, TargetFilter::AnyCell) {
            return Err(GridError::InvalidRegion { region });
        }

        log::trace!("flip {} to {:?}", region, content);

        let cell_size = self.cell_size();
        for (coords, offset) in region.cells() {
            self.store.swap(coords)?;
            let leaving = self.store.get(Layer::Hidden, coords)?;
            let footprint = GroupFootprint::new(region.size, offset, leaving, cell_size);
            renderer.on_cell_leave(coords, leaving, &footprint);

            let entering = match &content {
                Some(content) if offset == (0, 0) => Cell::anchor(region.size, content.clone()),
                Some(_) => Cell::member(offset),
                None => Cell::empty(),
            };
            let footprint = GroupFootprint::new(region.size, offset, &entering, cell_size);
            self.store.set(Layer::Visible, coords, entering)?;
            renderer.on_cell_enter(coords, self.store.get(Layer::Visible, coords)?, &footprint);
        }

        Ok(())
    }

    pub fn clear<R>(&mut self, region: Region, renderer: &mut R) -> Result<()>
    where
        R: Renderer + ?Sized,
    {
        self.flip(region, None, renderer)
    }

    /// Origins where a `size` region is available, scanning rows top to bottom.
    pub fn iter_available(
        &self,
        size: Coord2,
        filter: TargetFilter,
    ) -> impl Iterator<Item = Coord2> + '_ {
        let (cols, rows) = self.size();
        (0..rows)
            .flat_map(move |y| (0..cols).map(move |x| (x, y)))
            .filter(move |&origin| self.is_available(Region::new(origin, size), filter))
    }

    /// Collects up to `limit` available origins; `limit == 0` collects all of them.
    pub fn get_available(&self, size: Coord2, limit: usize, filter: TargetFilter) -> Vec<Coord2> {
        let available = self.iter_available(size, filter);
        if limit == 0 {
            available.collect()
        } else {
            available.take(limit).collect()
        }
    }

    /// Flips a `size` group at a uniformly chosen available origin.
    ///
    /// Returns `Ok(false)` without touching the grid when there is no room.
    pub fn flip_random<U, R>(
        &mut self,
        size: Coord2,
        content: Option<ContentRef>,
        filter: TargetFilter,
        rng: &mut U,
        renderer: &mut R,
    ) -> Result<bool>
    where
        U: UniformSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if size.0 == 0 || size.1 == 0 {
            return Err(GridError::InvalidDimensions);
        }

        let available = self.get_available(size, 0, filter);
        let Some(&origin) = pick_from(rng, &available) else {
            log::debug!("no room for a {}x{} group ({:?})", size.0, size.1, filter);
            return Ok(false);
        };
        self.flip(Region::new(origin, size), content, renderer)?;
        Ok(true)
    }

    /// Occupied groups in the visible layer, by anchor in row-major order.
    pub fn groups(&self) -> impl Iterator<Item = (Region, &ContentRef)> + '_ {
        self.store
            .iter(Layer::Visible)
            .filter_map(|(coords, cell)| match (cell.role(), cell.content()) {
                (Some(GroupRole::Anchor { size }), Some(content)) if cell.is_occupied() => {
                    Some((Region::new(coords, size), content))
                }
                _ => None,
            })
    }

    /// Checks that every visible cell agrees with the group it claims to be in.
    pub fn validate(&self) -> Result<()> {
        match self
            .store
            .iter(Layer::Visible)
            .find(|&(coords, cell)| !self.is_consistent(coords, cell))
        {
            Some((coords, cell)) => {
                log::warn!("corrupt group at {:?}: {:?}", coords, cell);
                Err(GridError::CorruptGroup { coords })
            }
            None => Ok(()),
        }
    }

    fn is_consistent(&self, coords: Coord2, cell: &Cell) -> bool {
        match cell.role() {
            None => false,
            Some(GroupRole::Anchor { size }) if !cell.is_occupied() => {
                size == (1, 1) && cell.content().is_none()
            }
            Some(GroupRole::Anchor { size }) => {
                let region = Region::new(coords, size);
                cell.content().is_some()
                    && region.fits_within(self.size())
                    && region.cells().skip(1).all(|(member, offset)| {
                        let other = &self.store[(Layer::Visible, member)];
                        other.is_occupied()
                            && other.content().is_none()
                            && other.role() == Some(GroupRole::Member { offset })
                    })
            }
            Some(GroupRole::Member { offset }) => {
                let anchor = coords
                    .0
                    .checked_sub(offset.0)
                    .zip(coords.1.checked_sub(offset.1));
                cell.is_occupied()
                    && cell.content().is_none()
                    && anchor.is_some_and(|anchor| {
                        let anchor_cell = &self.store[(Layer::Visible, anchor)];
                        let Some(GroupRole::Anchor { size }) = anchor_cell.role() else {
                            return false;
                        };
                        anchor_cell.is_occupied() && Region::new(anchor, size).contains(coords)
                    })
            }
        }
    }
}
