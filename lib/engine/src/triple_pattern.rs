use crate::error::{FragmentError, InvalidRequestError};
use crate::fragment::Fragment;
use crate::resolver::{PatternResolver, Resolution};
use ldf_common::{MatchCursor, SeekError, TripleSource};
use ldf_model::{StorageError, TriplePattern};

/// Computes the fragment of a single `pattern` from `offset` with at most `limit` triples.
pub(crate) fn compute_fragment<TSource: TripleSource + ?Sized>(
    source: &TSource,
    pattern: &TriplePattern,
    offset: u64,
    limit: u64,
) -> Result<Fragment, FragmentError> {
    if limit == 0 {
        return Err(InvalidRequestError::ZeroLimit.into());
    }

    let resolved = match PatternResolver::new(source.dictionary()).resolve(pattern)? {
        Resolution::NoMatch => return Ok(Fragment::empty()),
        Resolution::Resolved(resolved) => resolved,
    };

    let mut cursor = resolved.search(source, resolved.constraints())?;
    let estimate = cursor.estimated_count();
    if estimate == 0 {
        tracing::debug!(%pattern, "Store has no candidates for pattern");
        return Ok(Fragment::empty());
    }

    let position = skip_to(&mut *cursor, offset)?;
    tracing::debug!(%pattern, offset, ?position, estimate, "Positioned cursor");

    let mut triples = Vec::new();
    if let Position::Reached = position {
        while (triples.len() as u64) < limit {
            let Some(triple) = cursor.next_match()? else {
                break;
            };
            triples.push(source.dictionary().materialize_triple(&triple)?);
        }
    }

    let collected = triples.len() as u64;
    let total_size = if collected == 0 {
        // Reaching a non-zero offset proves that matches exist.
        let has_matches = match position {
            Position::Reached => offset > 0,
            Position::Exhausted { skipped } => skipped > 0,
        };
        if has_matches {
            estimate.max(1)
        } else {
            0
        }
    } else if cursor.has_next()? {
        estimate.max(offset + collected + 1)
    } else {
        offset + collected
    };

    Ok(Fragment::new(triples, total_size))
}

/// The state of a cursor after skipping to an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// The next match of the cursor is the one at the offset.
    Reached,
    /// The cursor ended before the offset after yielding `skipped` matches.
    Exhausted { skipped: u64 },
}

/// Advances `cursor` by `offset` matches.
///
/// Seekable cursors jump directly. Others are stepped through one match at a time. Seeking past
/// the end is not an error and results in [Position::Exhausted].
pub(crate) fn skip_to(
    cursor: &mut dyn MatchCursor,
    offset: u64,
) -> Result<Position, StorageError> {
    if offset == 0 {
        return Ok(Position::Reached);
    }

    if cursor.supports_seek() {
        match cursor.seek(offset) {
            Ok(()) => return Ok(Position::Reached),
            Err(SeekError::OutOfRange { length, .. }) => {
                return Ok(Position::Exhausted { skipped: length })
            }
            Err(SeekError::Storage(error)) => return Err(error),
            Err(SeekError::Unsupported) => {}
        }
    }

    let mut skipped = 0;
    while skipped < offset {
        if cursor.next_match()?.is_none() {
            return Ok(Position::Exhausted { skipped });
        }
        skipped += 1;
    }
    Ok(Position::Reached)
}
