use crate::config::Color;
use std::f64::consts::TAU;

/// Slice fill colors, cycled by slice index.
pub const PALETTE: [Color; 10] = [
    Color::from_hex(0xFF6384),
    Color::from_hex(0x36A2EB),
    Color::from_hex(0xFFCE56),
    Color::from_hex(0x4BC0C0),
    Color::from_hex(0x9966FF),
    Color::from_hex(0xFF9F40),
    Color::from_hex(0xC9CBCF),
    Color::from_hex(0xFF6384),
    Color::from_hex(0x36A2EB),
    Color::from_hex(0xFFCE56),
];

/// Angular width of one slice when the circle is split `count` ways.
pub fn slice_arc(count: usize) -> f64 {
    debug_assert!(count > 0, "slice_arc called on an empty wheel");
    TAU / count as f64
}

pub fn color_for_index(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Drawn start and end angle of slice `index` at the given wheel rotation.
pub fn slice_bounds(index: usize, count: usize, rotation: f64) -> (f64, f64) {
    let arc = slice_arc(count);
    let start = index as f64 * arc + rotation;
    (start, start + arc)
}

/// Index of the slice sitting under the pointer.
///
/// The pointer is fixed at angle 0 while slices are laid out from `rotation`
/// in increasing index order, so the lookup runs the rotation backwards:
/// `floor(((2π - rotation % 2π) % 2π) / arc) % count`.
///
/// Panics when `count` is zero.
pub fn resolve_winner_index(rotation: f64, count: usize) -> usize {
    assert!(count > 0, "cannot resolve a winner on an empty wheel");
    let arc = slice_arc(count);
    let normalized = (TAU - (rotation % TAU)) % TAU;
    // Negative rotations push `normalized` past 2π before the outer remainder,
    // rem_euclid folds anything left over back into range.
    let normalized = normalized.rem_euclid(TAU);
    (normalized / arc).floor() as usize % count
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_slice_arc_covers_full_circle() {
        for count in 1..=64 {
            let total = slice_arc(count) * count as f64;
            assert!((total - TAU).abs() < EPSILON, "count {count}: {total}");
        }
    }

    #[test]
    fn test_palette_has_seven_distinct_colors() {
        let mut distinct: Vec<(u8, u8, u8)> = Vec::new();
        for color in PALETTE {
            if !distinct.contains(&color.as_tuple()) {
                distinct.push(color.as_tuple());
            }
        }
        assert_eq!(distinct.len(), 7);
    }

    #[test]
    fn test_color_for_index_cycles() {
        assert_eq!(color_for_index(0), color_for_index(PALETTE.len()));
        assert_eq!(color_for_index(3), color_for_index(3 + 2 * PALETTE.len()));
        assert_eq!(color_for_index(1).as_tuple(), (0x36, 0xA2, 0xEB));
    }

    #[test]
    fn test_winner_index_in_range() {
        let rotations = [
            0.0, 0.1, 1.0, -1.0, -0.25, 3.5, TAU, -TAU, 100.0, -100.0, 12345.678, 1e-12,
        ];
        for count in 1..=12 {
            for &rotation in &rotations {
                let index = resolve_winner_index(rotation, count);
                assert!(index < count, "rotation {rotation} count {count} -> {index}");
            }
        }
    }

    #[test]
    fn test_winner_index_is_periodic() {
        for count in [2, 3, 4, 7, 10] {
            // Stay clear of slice boundaries so rounding in `+ TAU` can't flip a slice.
            let arc = slice_arc(count);
            for step in 0..(count * 3) {
                let rotation = (step as f64 + 0.5) * arc + 1.0e-3;
                assert_eq!(
                    resolve_winner_index(rotation, count),
                    resolve_winner_index(rotation + TAU, count),
                    "rotation {rotation} count {count}"
                );
            }
        }
    }

    #[test]
    fn test_single_slice_always_wins() {
        for rotation in [0.0, 0.5, 2.0, -3.0, 1000.0] {
            assert_eq!(resolve_winner_index(rotation, 1), 0);
        }
    }

    #[test]
    fn test_zero_rotation_picks_first_slice() {
        assert_eq!(resolve_winner_index(0.0, 4), 0);
    }

    #[test]
    fn test_one_slice_of_rotation_steps_backwards() {
        // (2π - π/2) / (π/2) = 3, so the slice before the first one is under the pointer.
        let arc = slice_arc(4);
        assert_eq!(resolve_winner_index(arc, 4), 3);
        assert_eq!(resolve_winner_index(2.0 * arc + 0.01, 4), 1);
    }

    #[test]
    fn test_winner_slice_contains_pointer() {
        let count = 5;
        let arc = slice_arc(count);
        for step in 0..40 {
            let rotation = step as f64 * 0.37 + 0.01;
            let index = resolve_winner_index(rotation, count);
            let (start, _) = slice_bounds(index, count, rotation);
            // angle 0 measured from the slice start
            let offset = (-start).rem_euclid(TAU);
            assert!(
                offset < arc + EPSILON || offset > TAU - EPSILON,
                "rotation {rotation}: slice {index} misses the pointer by {offset}"
            );
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_wheel_has_no_winner() {
        resolve_winner_index(1.0, 0);
    }
}
