//! Random picks used to build teams and grow sequences.

use std::{collections::HashSet, ops::RangeInclusive};

use rand::{Rng, rng, seq::IndexedRandom};

use crate::{dao::models::PokemonId, error::ServiceError};

/// Uniform random integer in `[start, end]`.
pub fn pick_number(start: u32, end: u32) -> Result<u32, ServiceError> {
    if start > end {
        return Err(ServiceError::InvalidRange { start, end });
    }
    Ok(rng().random_range(start..=end))
}

/// Draw `size` distinct Pokédex numbers from `range`, in draw order.
pub fn draw_team(
    range: RangeInclusive<PokemonId>,
    size: usize,
) -> Result<Vec<PokemonId>, ServiceError> {
    let (start, end) = range.into_inner();
    if start > end {
        return Err(ServiceError::InvalidRange { start, end });
    }
    if size == 0 {
        return Err(ServiceError::InvalidInput(
            "team size must be strictly positive".into(),
        ));
    }

    let available = u64::from(end - start) + 1;
    if (size as u64) > available {
        return Err(ServiceError::InvalidInput(format!(
            "cannot draw {size} distinct pokemon from {available} candidates"
        )));
    }

    let mut seen = HashSet::with_capacity(size);
    let mut team = Vec::with_capacity(size);
    while team.len() < size {
        let candidate = pick_number(start, end)?;
        if seen.insert(candidate) {
            team.push(candidate);
        }
    }
    Ok(team)
}

/// Pick the member of `team` the player will have to add to the sequence next.
pub fn next_in_sequence(team: &[PokemonId]) -> Result<PokemonId, ServiceError> {
    team.choose(&mut rng())
        .copied()
        .ok_or_else(|| ServiceError::InvalidState("game has an empty team".into()))
}
