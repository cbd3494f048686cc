use crate::bindings::generator::SubPatternGenerator;
use crate::bindings::replay::ReplayableCursor;
use crate::error::{FragmentError, InvalidRequestError};
use crate::fragment::Fragment;
use crate::resolver::{PatternResolver, Resolution, ResolvedPattern};
use crate::triple_pattern::{skip_to, Position};
use ldf_common::{MatchCursor, TripleSource};
use ldf_model::{BindingTable, EncodedTriplePattern, StorageError, TriplePattern};

type SubPatterns<'table> = ReplayableCursor<SubPatternGenerator<'table>, EncodedTriplePattern>;

/// Computes the fragment of `pattern` restricted by `bindings` from `offset` with at most `limit`
/// triples.
///
/// If the page is full, the total size is extrapolated from the first `sample_size` distinct
/// sub-patterns.
pub(crate) fn compute_binding_restricted_fragment<TSource: TripleSource + ?Sized>(
    source: &TSource,
    pattern: &TriplePattern,
    bindings: &BindingTable,
    offset: u64,
    limit: u64,
    sample_size: usize,
) -> Result<Fragment, FragmentError> {
    if limit == 0 {
        return Err(InvalidRequestError::ZeroLimit.into());
    }

    let resolved = match PatternResolver::new(source.dictionary()).resolve(pattern)? {
        Resolution::NoMatch => return Ok(Fragment::empty()),
        Resolution::Resolved(resolved) => resolved,
    };
    if bindings.is_empty() {
        tracing::debug!(%pattern, "Binding table has no rows");
        return Ok(Fragment::empty());
    }

    let generator = SubPatternGenerator::new(
        source.dictionary(),
        pattern,
        *resolved.constraints(),
        bindings,
    );
    tracing::debug!(
        %pattern,
        rows = bindings.len(),
        deduplicate = generator.deduplicates(),
        "Computing binding-restricted fragment"
    );
    let mut sub_patterns = ReplayableCursor::new(generator);
    let mut searcher = SubPatternSearcher {
        source,
        resolved: &resolved,
        estimates: Vec::new(),
    };

    // Skip phase
    let mut skipped = 0;
    let mut current = None;
    while let Some(mut cursor) = searcher.next_non_empty(&mut sub_patterns)? {
        match skip_to(&mut *cursor, offset - skipped)? {
            Position::Reached => {
                skipped = offset;
                current = Some(cursor);
                break;
            }
            Position::Exhausted { skipped: matches } => skipped += matches,
        }
    }
    tracing::debug!(
        offset,
        skipped,
        sub_patterns = sub_patterns.position(),
        "Skipped to offset"
    );

    // Fill phase
    let mut triples = Vec::new();
    while (triples.len() as u64) < limit {
        let Some(cursor) = current.as_mut() else {
            break;
        };
        match cursor.next_match()? {
            Some(triple) => triples.push(source.dictionary().materialize_triple(&triple)?),
            None => current = searcher.next_non_empty(&mut sub_patterns)?,
        }
    }

    let collected = triples.len() as u64;
    tracing::debug!(
        collected,
        sub_patterns = sub_patterns.position(),
        "Filled page"
    );

    // The fill phase only stops early if every sub-pattern is exhausted.
    let total_size = if collected < limit {
        offset + collected
    } else {
        searcher
            .estimate_total(&mut sub_patterns, sample_size)?
            .max(offset + collected + 1)
    };

    Ok(Fragment::new(triples, total_size))
}

/// Searches the store for sub-patterns and remembers their estimates.
struct SubPatternSearcher<'search, TSource: ?Sized> {
    source: &'search TSource,
    resolved: &'search ResolvedPattern,
    /// The estimate of each searched sub-pattern in the order of the sub-pattern cursor.
    estimates: Vec<u64>,
}

impl<'search, TSource: TripleSource + ?Sized> SubPatternSearcher<'search, TSource> {
    /// Searches the next sub-patterns until one has matches.
    fn next_non_empty(
        &mut self,
        sub_patterns: &mut SubPatterns<'_>,
    ) -> Result<Option<Box<dyn MatchCursor + 'search>>, StorageError> {
        while let Some(sub_pattern) = sub_patterns.next()? {
            let mut cursor = self.search(&sub_pattern)?;
            let estimate = sampled_estimate(&mut *cursor)?;
            self.estimates.push(estimate);
            if estimate > 0 {
                return Ok(Some(cursor));
            }
        }
        Ok(None)
    }

    /// Extrapolates the number of matches of all sub-patterns from the first `sample_size`
    /// sub-patterns.
    ///
    /// Sub-patterns that were already searched during paging are not searched again.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Estimates are approximate"
    )]
    fn estimate_total(
        &mut self,
        sub_patterns: &mut SubPatterns<'_>,
        sample_size: usize,
    ) -> Result<u64, StorageError> {
        sub_patterns.reset();

        let mut sampled = 0;
        let mut sum = 0;
        while sampled < sample_size {
            let Some(sub_pattern) = sub_patterns.next()? else {
                break;
            };
            sum += match self.estimates.get(sampled) {
                Some(estimate) => *estimate,
                None => {
                    let mut cursor = self.search(&sub_pattern)?;
                    sampled_estimate(&mut *cursor)?
                }
            };
            sampled += 1;
        }

        let total = sub_patterns.total()?;
        let estimate = if sampled == 0 || total <= sampled {
            sum
        } else {
            (sum as f64 * (total as f64 / sampled as f64)).round() as u64
        };
        tracing::debug!(sampled, total, sum, estimate, "Estimated fragment size");
        Ok(estimate)
    }

    fn search(
        &self,
        sub_pattern: &EncodedTriplePattern,
    ) -> Result<Box<dyn MatchCursor + 'search>, StorageError> {
        tracing::trace!(%sub_pattern, "Searching sub-pattern");
        self.resolved.search(self.source, sub_pattern)
    }
}

/// Returns the store estimate of `cursor`, or zero if the cursor has no match.
fn sampled_estimate(cursor: &mut dyn MatchCursor) -> Result<u64, StorageError> {
    if cursor.estimated_count() == 0 || !cursor.has_next()? {
        return Ok(0);
    }
    Ok(cursor.estimated_count().max(1))
}
