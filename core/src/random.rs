/// Uniform choice of an index, injected into random flips so they can be replayed.
pub trait UniformSource {
    /// Returns an index in `0..n`. Only called with `n > 0`.
    fn pick(&mut self, n: usize) -> usize;
}

/// Picks one of `items` with `source`, `None` when there is nothing to pick.
///
/// Indices past the end are clamped to the last item.
pub fn pick_from<'a, T, U>(source: &mut U, items: &'a [T]) -> Option<&'a T>
where
    U: UniformSource + ?Sized,
{
    let last = items.len().checked_sub(1)?;
    let index = source.pick(items.len());
    if index > last {
        log::warn!("uniform source picked {} of {}, using the last item", index, items.len());
    }
    items.get(index.min(last))
}

impl<R: rand::Rng + ?Sized> UniformSource for R {
    fn pick(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}
