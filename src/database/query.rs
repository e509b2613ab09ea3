//! Result limiting for lazy query streams

/// Cap a stream of results at `n` leading elements, preserving order.
///
/// `n` of `0` or `None` means unlimited. The adapter is single-pass and
/// buffers nothing: it composes with [`NeoDatabase::query`] so that a small
/// limit over a large event collection never evaluates the excluded
/// remainder. Only the elements the consumer actually pulls get evaluated;
/// pulling stops caller-side.
///
/// [`NeoDatabase::query`]: super::NeoDatabase::query
pub fn limit<I>(results: I, n: Option<usize>) -> impl Iterator<Item = I::Item>
where
    I: Iterator,
{
    let cap = match n {
        Some(0) | None => usize::MAX,
        Some(n) => n,
    };
    results.take(cap)
}
