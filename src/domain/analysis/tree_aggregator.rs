//! Tree Aggregator - bottom-up satisfaction scores and top-down absolute weights.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::{HierarchyNode, ValueFunctionParams};

use super::{ValueFunctionCache, DEFAULT_CACHE_CAPACITY};

/// Satisfaction score in `[0, 1]` for every node of one tree snapshot.
///
/// Valid only for the snapshot it was computed from; recompute in full on
/// any change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    scores: HashMap<NodeId, f64>,
}

impl ScoreMap {
    /// Creates an empty score map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the score of a node, if it was part of the scored tree.
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    /// Returns the score of a node, or 0.0 when absent.
    pub fn score_of(&self, id: NodeId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    /// Records a score, replacing any previous one.
    pub fn insert(&mut self, id: NodeId, score: f64) {
        self.scores.insert(id, score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }
}

impl FromIterator<(NodeId, f64)> for ScoreMap {
    fn from_iter<T: IntoIterator<Item = (NodeId, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// One indicator's share of the root index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorContribution {
    pub id: NodeId,
    pub name: String,
    /// Product of local weight fractions from the indicator up to the root.
    pub absolute_weight: f64,
    pub satisfaction: f64,
    /// `absolute_weight * satisfaction`.
    pub contribution: f64,
}

/// Weighted aggregation over a MIVES tree.
///
/// Holds the value function cache; everything else is stateless, and the
/// tree is only ever borrowed.
pub struct TreeAggregator {
    cache: ValueFunctionCache,
}

impl TreeAggregator {
    /// Creates an aggregator memoizing up to `cache_capacity` evaluations.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: ValueFunctionCache::new(cache_capacity),
        }
    }

    /// Computes the satisfaction score of every node reachable from `root`.
    ///
    /// # Algorithm
    /// Single post-order traversal:
    /// - Indicator: evaluate its value function at the supplied input
    ///   (defaulting to `x_sat_0`, i.e. zero satisfaction)
    /// - Other nodes: `Σ(score_i × w_i) / Σ(w_i)` over children, with
    ///   `w_i = local_weight_i / 100`
    ///
    /// # Edge Cases
    /// - No children, or all children weighted 0%: score 0
    /// - Weights not summing to 100%: re-normalized against the actual sum
    /// - Indicator without parameters: default parameters are used
    pub fn score(&self, root: &HierarchyNode, inputs: &HashMap<NodeId, f64>) -> ScoreMap {
        let mut scores = ScoreMap::new();
        let root_score = self.score_node(root, inputs, &mut scores);
        tracing::debug!(nodes = scores.len(), root_score, "tree scored");
        scores
    }

    fn score_node(
        &self,
        node: &HierarchyNode,
        inputs: &HashMap<NodeId, f64>,
        scores: &mut ScoreMap,
    ) -> f64 {
        let score = if node.kind().is_indicator() {
            let default_params;
            let params = match node.function() {
                Some(params) => params,
                None => {
                    default_params = ValueFunctionParams::default();
                    &default_params
                }
            };
            let x = inputs.get(&node.id()).copied().unwrap_or(params.x_sat_0);
            self.cache.evaluate_params(params, x)
        } else {
            let mut total_score = 0.0;
            let mut total_weight = 0.0;
            for child in node.children() {
                let weight = weight_fraction(child);
                total_score += self.score_node(child, inputs, scores) * weight;
                total_weight += weight;
            }
            if total_weight > 0.0 {
                total_score / total_weight
            } else {
                0.0
            }
        };

        scores.insert(node.id(), score);
        score
    }

    /// Returns the satisfaction of `root` itself (the MIVES index).
    pub fn index(&self, root: &HierarchyNode, inputs: &HashMap<NodeId, f64>) -> f64 {
        self.score(root, inputs).score_of(root.id())
    }

    /// Product of local weight fractions from `id` up to, excluding, `root`.
    ///
    /// Returns `None` when `id` is not in the tree; `Some(1.0)` for the root.
    pub fn absolute_weight(root: &HierarchyNode, id: NodeId) -> Option<f64> {
        root.path_to(id)
            .map(|path| path.iter().skip(1).map(|node| weight_fraction(node)).product())
    }

    /// Absolute weight of every node, in one top-down pass.
    pub fn absolute_weights(root: &HierarchyNode) -> HashMap<NodeId, f64> {
        let mut weights = HashMap::new();
        let mut stack = vec![(root, 1.0)];

        while let Some((node, absolute)) = stack.pop() {
            weights.insert(node.id(), absolute);
            for child in node.children() {
                stack.push((child, absolute * weight_fraction(child)));
            }
        }

        weights
    }

    /// Index contribution of every indicator, in display order.
    ///
    /// When every level sums to 100%, the contributions sum to the root score.
    pub fn contributions(root: &HierarchyNode, scores: &ScoreMap) -> Vec<IndicatorContribution> {
        let weights = Self::absolute_weights(root);
        root.indicators()
            .map(|indicator| {
                let absolute_weight = weights.get(&indicator.id()).copied().unwrap_or(0.0);
                let satisfaction = scores.score_of(indicator.id());
                IndicatorContribution {
                    id: indicator.id(),
                    name: indicator.name().to_string(),
                    absolute_weight,
                    satisfaction,
                    contribution: absolute_weight * satisfaction,
                }
            })
            .collect()
    }
}

impl Default for TreeAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Local weight as a fraction; anything non-finite or negative counts as 0.
pub(crate) fn weight_fraction(node: &HierarchyNode) -> f64 {
    let fraction = node.local_weight().as_fraction();
    if fraction.is_finite() && fraction > 0.0 {
        fraction
    } else {
        0.0
    }
}
