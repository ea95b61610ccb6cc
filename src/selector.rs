//! Contextual transition selection.
//!
//! A selector owns its own [`History`], so each slideshow session keeps an
//! independent memory of what it has shown. Selection never fails: every
//! branch ends in either a scored candidate or the safe subset.

use crate::catalog::{Category, Transition, ALL, SAFE};
use crate::config::SelectorConfig;
use crate::history::History;
use crate::rules::{ContentType, MediaType, PositionClass, RuleSet};
use crate::slide::{SlideDescriptor, TransitionMode};
use rand::Rng;
use serde::Serialize;

const CONTENT_PRIMARY: u32 = 40;
const CONTENT_SECONDARY: u32 = 20;
const MEDIA_PRIMARY: u32 = 30;
const MEDIA_SECONDARY: u32 = 15;
const POSITION_PRIMARY: u32 = 15;
const CONTRAST_BONUS: u32 = 15;

/// Penalty for a transition used `rank` selections ago (1 = last one).
fn recency_penalty(rank: usize) -> u32 {
    50u32.saturating_sub(10 * rank.min(5) as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub transition: Transition,
    /// Mode that actually produced the transition.
    pub mode: TransitionMode,
    pub position: PositionClass,
    pub safe_fallback: bool,
}

/// Weighted candidates in insertion order.
#[derive(Debug, Default)]
struct Pool {
    entries: Vec<(Transition, u32)>,
}

impl Pool {
    fn add(&mut self, items: &[Transition], weight: u32, excluded: &[Transition]) {
        for t in items {
            if excluded.contains(t) {
                continue;
            }
            match self.entries.iter_mut().find(|(c, _)| c == t) {
                Some((_, w)) => *w += weight,
                None => self.entries.push((*t, weight)),
            }
        }
    }

    /// Only raises candidates that are already in the pool.
    fn boost(&mut self, items: &[Transition], weight: u32) {
        for (c, w) in self.entries.iter_mut() {
            if items.contains(c) {
                *w += weight;
            }
        }
    }

    fn penalize(&mut self, t: Transition, penalty: u32) {
        if let Some((_, w)) = self.entries.iter_mut().find(|(c, _)| *c == t) {
            *w = w.saturating_sub(penalty);
        }
    }

    fn exclude(&mut self, avoid: &[Transition]) {
        self.entries.retain(|(c, _)| !avoid.contains(c));
    }
}

/// Standard weighted choice: zero weights count as one, so nothing in the
/// pool is unreachable.
fn weighted_choice<R: Rng + ?Sized>(
    entries: &[(Transition, u32)],
    rng: &mut R,
) -> Option<Transition> {
    let total: u64 = entries.iter().map(|(_, w)| u64::from((*w).max(1))).sum();
    if total == 0 {
        return None;
    }
    let mut remaining = rng.random_range(0..total);
    for (t, w) in entries {
        let w = u64::from((*w).max(1));
        if remaining < w {
            return Some(*t);
        }
        remaining -= w;
    }
    entries.last().map(|(t, _)| *t)
}

#[derive(Debug, Clone)]
pub struct TransitionSelector {
    rules: RuleSet,
    history: History,
    min_variety: usize,
    record_manual: bool,
    safe_fallback_weight: u32,
    default_mode: TransitionMode,
}

impl TransitionSelector {
    pub fn new(rules: RuleSet, config: &SelectorConfig) -> Self {
        Self {
            rules,
            history: History::with_capacity(config.history_capacity),
            min_variety: config.min_variety,
            record_manual: config.record_manual,
            safe_fallback_weight: config.safe_fallback_weight,
            default_mode: config.default_transition_mode,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    /// Picks the transition that plays when `slide` (at `index` in `slides`)
    /// hands over to the next one.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        slide: &SlideDescriptor,
        slides: &[SlideDescriptor],
        index: usize,
        rng: &mut R,
    ) -> Selection {
        let position = PositionClass::classify(index, slides.len());
        let mode = slide.mode(self.default_mode);

        if mode == TransitionMode::Manual {
            if let Some(name) = slide.manual_type() {
                match Transition::parse(name) {
                    Some(transition) => {
                        if self.record_manual {
                            self.history.push(transition);
                        }
                        return Selection {
                            transition,
                            mode,
                            position,
                            safe_fallback: false,
                        };
                    }
                    None => {
                        tracing::warn!(
                            transition = name,
                            "unknown manual transition; selecting automatically"
                        );
                    }
                }
            }
        }

        let (transition, mode, safe_fallback, candidates) = if mode == TransitionMode::Random {
            let (t, candidates) = self.intelligent_random(slide.content(), rng);
            (t, mode, false, candidates)
        } else {
            let (t, fallback, candidates) = self.weighted_auto(slide, position, rng);
            (t, TransitionMode::Auto, fallback, candidates)
        };
        self.history.push(transition);

        tracing::debug!(
            transition = transition.name(),
            ?mode,
            ?position,
            safe_fallback,
            candidates,
            "selected transition"
        );
        Selection {
            transition,
            mode,
            position,
            safe_fallback,
        }
    }

    /// Uniform pick that skips recent transitions and the content type's
    /// avoid list, relaxing each filter rather than emptying the pool.
    /// Returns the pick and the size of the pool it was drawn from.
    fn intelligent_random<R: Rng + ?Sized>(
        &self,
        content: Option<ContentType>,
        rng: &mut R,
    ) -> (Transition, usize) {
        let fresh: Vec<Transition> = ALL
            .iter()
            .copied()
            .filter(|t| !self.history.contains(*t))
            .collect();
        let pool = if !fresh.is_empty() && fresh.len() >= self.min_variety {
            fresh
        } else {
            ALL.to_vec()
        };

        let rule = self.rules.content_rule(content);
        let suitable: Vec<Transition> = pool
            .iter()
            .copied()
            .filter(|t| !rule.is_some_and(|r| r.avoids(*t)))
            .collect();
        let pool = if suitable.is_empty() { pool } else { suitable };

        (pool[rng.random_range(0..pool.len())], pool.len())
    }

    pub(crate) fn candidate_weights(
        &self,
        content: Option<ContentType>,
        media: Option<MediaType>,
        position: PositionClass,
    ) -> Vec<(Transition, u32)> {
        let mut pool = Pool::default();
        let mut excluded: Vec<Transition> = Vec::new();

        if let Some(rule) = self.rules.content_rule(content) {
            pool.add(&rule.primary, CONTENT_PRIMARY, &excluded);
            pool.add(&rule.secondary, CONTENT_SECONDARY, &excluded);
            excluded.extend(&rule.avoid);
            pool.exclude(&excluded);
        }
        if let Some(rule) = self.rules.media_rule(media) {
            pool.add(&rule.primary, MEDIA_PRIMARY, &excluded);
            pool.add(&rule.secondary, MEDIA_SECONDARY, &excluded);
            excluded.extend(&rule.avoid);
            pool.exclude(&excluded);
        }

        pool.boost(self.rules.position_primary(position), POSITION_PRIMARY);
        // No contrast on the opening slide. Before anything has been shown
        // the previous transition counts as smooth.
        if position != PositionClass::First {
            let previous = self
                .history
                .last()
                .map_or(Category::Smooth, Transition::category);
            pool.boost(self.rules.contrast_after(previous), CONTRAST_BONUS);
        }

        let n = self.history.len();
        for (i, t) in self.history.iter().enumerate() {
            pool.penalize(t, recency_penalty(n - i));
        }

        pool.entries
    }

    fn weighted_auto<R: Rng + ?Sized>(
        &self,
        slide: &SlideDescriptor,
        position: PositionClass,
        rng: &mut R,
    ) -> (Transition, bool, usize) {
        let candidates = self.candidate_weights(slide.content(), slide.media(), position);
        if let Some(t) = weighted_choice(&candidates, rng) {
            return (t, false, candidates.len());
        }

        tracing::debug!(
            content_type = ?slide.content_type,
            media_type = ?slide.media_type,
            "no contextual candidates; using safe subset"
        );
        let safe: Vec<(Transition, u32)> = SAFE
            .iter()
            .map(|t| (*t, self.safe_fallback_weight))
            .collect();
        let t = weighted_choice(&safe, rng).unwrap_or(Transition::Fade);
        (t, true, safe.len())
    }
}
