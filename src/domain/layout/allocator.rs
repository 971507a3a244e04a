//! Proportional vertical allocation shared by both diagram modes.

use std::collections::BTreeMap;

use super::options::LayoutOptions;

/// Where one bar lands after allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub column_x: f64,
    pub center_y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Allocation {
    pub placements: Vec<Placement>,
    pub scale: f64,
    pub gap: f64,
    pub margin: f64,
}

/// Stacks bars column by column, top to bottom, in the given order.
///
/// `slots` is `(depth, unscaled height)` per bar. A single global scale is
/// chosen so the most crowded column fits `options.available_height()`; the
/// gap is scaled with the bars so every column satisfies
/// `sum(heights) + gap * (n - 1) <= available`.
pub(crate) fn allocate(slots: &[(usize, f64)], options: &LayoutOptions) -> Allocation {
    let margin = options.margin();
    let available = options.available_height();
    let gap = options.effective_gap();

    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, (depth, _)) in slots.iter().enumerate() {
        columns.entry(*depth).or_default().push(index);
    }
    let max_depth = columns.keys().next_back().copied().unwrap_or(0);

    let height_of = |index: usize| sanitize(slots[index].1);

    let worst_ratio = columns
        .values()
        .map(|members| {
            let heights: f64 = members.iter().map(|&i| height_of(i)).sum();
            let needed = heights + gap * members.len().saturating_sub(1) as f64;
            needed / available
        })
        .fold(1.0_f64, f64::max);
    let scale = 1.0 / worst_ratio;
    let scaled_gap = gap * scale;

    let mut placements = vec![
        Placement {
            column_x: 0.0,
            center_y: 0.0,
            height: 0.0,
        };
        slots.len()
    ];
    for (depth, members) in &columns {
        let column_x = if max_depth == 0 {
            0.5
        } else {
            *depth as f64 / max_depth as f64
        };
        let mut cursor = margin;
        for &index in members {
            let height = height_of(index) * scale;
            placements[index] = Placement {
                column_x,
                center_y: cursor + height / 2.0,
                height,
            };
            cursor += height + scaled_gap;
        }
    }

    Allocation {
        placements,
        scale,
        gap: scaled_gap,
        margin,
    }
}

fn sanitize(height: f64) -> f64 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}
