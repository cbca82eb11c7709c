use std::iter::Take;

/// A sequence that is either passed through untouched or cut short.
#[derive(Debug, Clone)]
pub enum Limited<I> {
    Unbounded(I),
    Bounded(Take<I>),
}

impl<I: Iterator> Iterator for Limited<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Limited::Unbounded(iter) => iter.next(),
            Limited::Bounded(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Limited::Unbounded(iter) => iter.size_hint(),
            Limited::Bounded(iter) => iter.size_hint(),
        }
    }
}

/// Produces at most `n` items of `items`, lazily.
///
/// `None` and `Some(0)` mean "no limit". With a positive limit the source is
/// never advanced past its `n`th item.
pub fn limit<I: IntoIterator>(items: I, n: Option<usize>) -> Limited<I::IntoIter> {
    match n {
        Some(n) if n > 0 => Limited::Bounded(items.into_iter().take(n)),
        _ => Limited::Unbounded(items.into_iter()),
    }
}
