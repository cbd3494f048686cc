/// A cursor over the items of an iterator that can be rewound.
///
/// Items are cached as they are pulled from the iterator for the first time. After [Self::reset],
/// the cursor replays the cache and only continues pulling from the iterator once it moves past
/// the cached items. The iterator is therefore consumed at most once.
pub(crate) struct ReplayableCursor<TIter, TItem> {
    source: TIter,
    cache: Vec<TItem>,
    position: usize,
    exhausted: bool,
}

impl<TIter, TItem, TError> ReplayableCursor<TIter, TItem>
where
    TIter: Iterator<Item = Result<TItem, TError>>,
    TItem: Clone,
{
    pub(crate) fn new(source: TIter) -> Self {
        Self {
            source,
            cache: Vec::new(),
            position: 0,
            exhausted: false,
        }
    }

    /// Returns the next item, or [None] if the source is exhausted.
    pub(crate) fn next(&mut self) -> Result<Option<TItem>, TError> {
        if self.position >= self.cache.len() && !self.pull()? {
            return Ok(None);
        }

        let item = self.cache[self.position].clone();
        self.position += 1;
        Ok(Some(item))
    }

    /// Rewinds the cursor to the first item.
    pub(crate) fn reset(&mut self) {
        self.position = 0;
    }

    /// Returns the number of items that were returned since the last reset.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Returns the total number of items.
    ///
    /// This drains the source into the cache but does not move the cursor.
    pub(crate) fn total(&mut self) -> Result<usize, TError> {
        while self.pull()? {}
        Ok(self.cache.len())
    }

    /// Pulls one item from the source into the cache. Returns false if the source is exhausted.
    fn pull(&mut self) -> Result<bool, TError> {
        if self.exhausted {
            return Ok(false);
        }

        match self.source.next().transpose()? {
            Some(item) => {
                self.cache.push(item);
                Ok(true)
            }
            None => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }
}
