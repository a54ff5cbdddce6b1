//! Row ordering policies
//!
//! Comparators here follow subtraction semantics: a strictly positive result
//! moves the left row after the right one. Missing slots and missing values
//! coerce to `0` in the arithmetic, and a `NaN` result leaves the pair where it
//! is. That last rule can make the outcome depend on input order; callers may
//! rely on it, so it is kept as is.

use std::cmp::Ordering;

use config_system::TooltipOrder;
use shared_types::DataPoint;

use crate::context::TooltipContext;

/// Stable in-place insertion sort driven by a subtraction-style comparator.
/// Never panics on inconsistent comparators; row counts are small.
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> f64,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) > 0.0 {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// `null` arithmetic: an absent operand counts as zero
fn coerce(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn slot_value(slot: &Option<DataPoint>) -> Option<f64> {
    slot.as_ref().and_then(|p| p.value)
}

/// Reorder a selection according to the configured policy
pub fn sort_rows(points: &mut [Option<DataPoint>], ctx: &TooltipContext) {
    match &ctx.config.order {
        TooltipOrder::Declaration if ctx.has_groups() => sort_by_stack(points, ctx),
        TooltipOrder::Declaration => {}
        TooltipOrder::Asc => stable_sort_by(points, |a, b| {
            coerce(slot_value(a)) - coerce(slot_value(b))
        }),
        TooltipOrder::Desc => stable_sort_by(points, |a, b| {
            coerce(slot_value(b)) - coerce(slot_value(a))
        }),
        TooltipOrder::Compare(compare) => stable_sort_by(points, |a, b| {
            match compare(a.as_ref(), b.as_ref()) {
                Ordering::Less => -1.0,
                Ordering::Equal => 0.0,
                Ordering::Greater => 1.0,
            }
        }),
    }
}

/// Match the visual stack: positive rows by stack position, everything else by value
fn sort_by_stack(points: &mut [Option<DataPoint>], ctx: &TooltipContext) {
    let ids: Vec<&str> = ctx.target_order.iter().rev().map(String::as_str).collect();
    let stack_position = |slot: &Option<DataPoint>| -> Option<f64> {
        slot.as_ref().and_then(|p| {
            if p.id.is_empty() {
                None
            } else {
                Some(ids.iter().position(|id| *id == p.id).map_or(-1.0, |i| i as f64))
            }
        })
    };

    stable_sort_by(points, |a, b| {
        let mut v1 = slot_value(a);
        let mut v2 = slot_value(b);

        if v1.map_or(false, |v| v > 0.0) && v2.map_or(false, |v| v > 0.0) {
            v1 = stack_position(a);
            v2 = stack_position(b);
        }

        coerce(v1) - coerce(v2)
    });
}
