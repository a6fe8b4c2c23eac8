//! Built-in move heuristics.
//!
//! Every heuristic scans the legal (card, row) pairs in hand order, then row
//! order, and keeps the first pair that strictly beats the best so far. They
//! return `None` only when the hand has no legal pair at all.

use super::traits::{Candidate, DecisionView, Move};
use crate::core::Card;
use crate::rules::{MoveValidity, PlayingField};

const WEIGHT_CLOSENESS: f64 = 0.2;
const WEIGHT_PLAYABILITY: f64 = 0.5;
const WEIGHT_GAPS: f64 = 0.3;

/// Pairs at or below this count put `panic` into forcing mode.
const PANIC_THRESHOLD: usize = 2;

fn gap_of(view: &DecisionView<'_>, candidate: &Candidate) -> Card {
    match candidate.validity {
        MoveValidity::ReverseMove => -1,
        _ => (candidate.card - view.field.rows()[candidate.row].top()).abs(),
    }
}

/// Smallest gap any remaining card would leave on `field`.
fn min_gap_after(view: &DecisionView<'_>, skip: usize, field: &PlayingField) -> Card {
    let mut min_gap = view.max_card.saturating_mul(2);
    for row in field.rows() {
        for (index, &card) in view.hand.iter().enumerate() {
            if index == skip {
                continue;
            }
            if let Some(gap) = view.gap(card, row) {
                min_gap = min_gap.min(gap);
            }
        }
    }
    min_gap
}

fn others(hand: &[Card], skip: usize) -> impl Iterator<Item = Card> + '_ {
    hand.iter()
        .enumerate()
        .filter(move |&(i, _)| i != skip)
        .map(|(_, &card)| card)
}

/// Play the card closest to a row top. Reverse moves beat everything.
pub fn closest(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(Card, Move)> = None;
    for candidate in view.playable() {
        let gap = gap_of(view, &candidate);
        if best.map_or(true, |(g, _)| gap < g) {
            best = Some((gap, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m)
}

/// Like [`closest`], but never plays a reverse move.
pub fn closest_forward(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(Card, Move)> = None;
    for (card_index, &card) in view.hand.iter().enumerate() {
        for (row_index, row) in view.field.rows().iter().enumerate() {
            let validity = view
                .oracle
                .evaluate_with(card, row.top(), row.direction(), false);
            if !validity.is_playable() {
                continue;
            }
            let gap = (card - row.top()).abs();
            if best.map_or(true, |(g, _)| gap < g) {
                best = Some((gap, Move::new(card_index, row_index)));
            }
        }
    }
    best.map(|(_, m)| m)
}

/// Keep as many of the remaining cards playable as possible.
pub fn playability(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(usize, Move)> = None;
    for candidate in view.playable() {
        let after = view.field.with_move(candidate.card, candidate.row);
        let still = view.still_playable(candidate.card_index, &after);
        if best.map_or(true, |(s, _)| still > s) {
            best = Some((still, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m)
}

/// Work the ascending rows, shedding low cards first so the highest card
/// left in hand is as small as possible. Falls back to [`closest`].
pub fn ascending_first(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(Card, Move)> = None;
    for candidate in view
        .playable()
        .filter(|c| view.field.rows()[c.row].is_ascending())
    {
        let highest_left = others(view.hand, candidate.card_index).max().unwrap_or(0);
        if best.map_or(true, |(h, _)| highest_left < h) {
            best = Some((highest_left, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m).or_else(|| closest(view))
}

/// [`playability`], with ties broken by the smaller gap.
pub fn playability_closest(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(usize, Card, Move)> = None;
    for candidate in view.playable() {
        let after = view.field.with_move(candidate.card, candidate.row);
        let still = view.still_playable(candidate.card_index, &after);
        let gap = gap_of(view, &candidate);
        let better = match best {
            None => true,
            Some((s, g, _)) => still > s || (still == s && gap < g),
        };
        if better {
            best = Some((still, gap, candidate.to_move()));
        }
    }
    best.map(|(_, _, m)| m)
}

/// Keep row gaps wide: maximise the smallest gap the rest of the hand would
/// face after the move.
pub fn wide_gaps(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<(Card, Move)> = None;
    for candidate in view.playable() {
        let after = view.field.with_move(candidate.card, candidate.row);
        let min_gap = min_gap_after(view, candidate.card_index, &after);
        if best.map_or(true, |(g, _)| min_gap > g) {
            best = Some((min_gap, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m)
}

/// Weighted blend of closeness, playability, and gap width.
pub fn weighted(view: &DecisionView<'_>) -> Option<Move> {
    let max = f64::from(view.max_card);
    let mut best: Option<(f64, Move)> = None;
    for candidate in view.playable() {
        let closeness = match candidate.validity {
            MoveValidity::ReverseMove => max,
            _ => max - f64::from(gap_of(view, &candidate)),
        };
        let after = view.field.with_move(candidate.card, candidate.row);
        let still = view.still_playable(candidate.card_index, &after) as f64;
        let min_gap = f64::from(min_gap_after(view, candidate.card_index, &after));

        let score =
            WEIGHT_CLOSENESS * closeness + WEIGHT_PLAYABILITY * still + WEIGHT_GAPS * min_gap;
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m)
}

/// When almost stuck, dump the most extreme playable card; otherwise play
/// [`playability_closest`].
pub fn panic(view: &DecisionView<'_>) -> Option<Move> {
    if view.playable_count() <= PANIC_THRESHOLD {
        let mut best: Option<(Card, Move)> = None;
        for candidate in view.playable() {
            let ascending = view.field.rows()[candidate.row].is_ascending();
            let better = match best {
                None => true,
                Some((card, _)) if ascending => candidate.card > card,
                Some((card, _)) => candidate.card < card,
            };
            if better {
                best = Some((candidate.card, candidate.to_move()));
            }
        }
        if let Some((_, m)) = best {
            return Some(m);
        }
    }
    playability_closest(view)
}

/// Compare the hand against its first card: if more cards sit below it,
/// work the ascending rows ([`ascending_first`]); otherwise work the
/// descending rows, keeping the lowest card left in hand as high as
/// possible. Falls back to [`closest`].
pub fn blocking(view: &DecisionView<'_>) -> Option<Move> {
    let &pivot = view.hand.first()?;
    let below = view.hand.iter().filter(|&&c| c < pivot).count();
    let above = view.hand.iter().filter(|&&c| c > pivot).count();
    if below >= above {
        return ascending_first(view);
    }

    let mut best: Option<(Card, Move)> = None;
    for candidate in view
        .playable()
        .filter(|c| !view.field.rows()[c.row].is_ascending())
    {
        let lowest_left = others(view.hand, candidate.card_index)
            .min()
            .unwrap_or(view.max_card);
        if best.map_or(true, |(l, _)| lowest_left > l) {
            best = Some((lowest_left, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m).or_else(|| closest(view))
}

/// [`closest`], using hints as a tie-break: among equally close moves,
/// prefer rows no other player has claimed.
pub fn cooperative(view: &DecisionView<'_>) -> Option<Move> {
    let mut best: Option<((Card, bool), Move)> = None;
    for candidate in view.playable() {
        let key = (
            gap_of(view, &candidate),
            view.hints.claimed_by_other(candidate.row, view.player),
        );
        if best.map_or(true, |(k, _)| key < k) {
            best = Some((key, candidate.to_move()));
        }
    }
    best.map(|(_, m)| m)
}
