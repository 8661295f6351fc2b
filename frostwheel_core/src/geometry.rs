//! Wheel angles. Angles are degrees, measured clockwise from 12 o'clock, where
//! the pointer sits. The wheel itself turns clockwise by its cumulative rotation.

pub const FULL_TURN: f64 = 360.0;

// Rest angles closer than this to the target count as already there.
const REST_EPSILON: f64 = 1e-6;

pub fn angle_per_slice(slices: usize) -> f64 {
    FULL_TURN / slices as f64
}

/// Rest angle (rotation mod 360) that puts the centre of slice `index` under the pointer.
pub fn target_angle(index: usize, slices: usize) -> f64 {
    let slice = angle_per_slice(slices);
    FULL_TURN - (index as f64 * slice + slice / 2.0)
}

/// Forward travel from `start_rotation` to the next rest at `target`, after
/// `min_rotations` full turns. Always in `[min*360, min*360 + 360)`.
pub fn forward_delta(start_rotation: f64, target: f64, min_rotations: u32) -> f64 {
    let extra = min_rotations as f64 * FULL_TURN;
    let current = start_rotation.rem_euclid(FULL_TURN);
    let mut wrap = (target - current + FULL_TURN).rem_euclid(FULL_TURN);
    if wrap > FULL_TURN - REST_EPSILON {
        wrap = 0.0;
    }
    extra + wrap
}

/// Segment index used for tick detection: which slice-width band the
/// rotation itself currently falls in.
pub fn segment_at(rotation: f64, slices: usize) -> usize {
    let band = (rotation.rem_euclid(FULL_TURN) / angle_per_slice(slices)).floor() as usize;
    band.min(slices - 1)
}

/// Slice whose arc covers the pointer once the wheel is turned by `rotation`.
pub fn slice_under_pointer(rotation: f64, slices: usize) -> usize {
    let on_wheel = (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    let index = (on_wheel / angle_per_slice(slices)).floor() as usize;
    index.min(slices - 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceLayout {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub center_angle: f64,
    pub large_arc: bool,
}

impl SliceLayout {
    pub fn new(index: usize, slices: usize) -> Self {
        let slice = angle_per_slice(slices);
        let start_angle = index as f64 * slice;
        Self {
            index,
            start_angle,
            end_angle: start_angle + slice,
            center_angle: start_angle + slice / 2.0,
            large_arc: slice > 180.0,
        }
    }
}

pub fn layout(slices: usize) -> Vec<SliceLayout> {
    (0..slices).map(|i| SliceLayout::new(i, slices)).collect()
}

/// Wheel angle to canvas radians (canvas zero points at 3 o'clock).
pub fn to_screen_radians(angle: f64) -> f64 {
    (angle - 90.0).to_radians()
}

pub fn rim_point(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    let theta = to_screen_radians(angle);
    (center + radius * theta.cos(), center + radius * theta.sin())
}

/// SVG path of one slice inside a `2r x 2r` viewbox.
pub fn slice_path(slice: &SliceLayout, radius: f64) -> String {
    let (x1, y1) = rim_point(radius, radius, slice.start_angle);
    let (x2, y2) = rim_point(radius, radius, slice.end_angle);
    format!(
        "M {r} {r} L {x1} {y1} A {r} {r} 0 {large} 1 {x2} {y2} Z",
        r = radius,
        large = u8::from(slice.large_arc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let target = target_angle(5, 8);
        assert_eq!(target, 112.5);
        let delta = forward_delta(0.0, target, 6);
        assert_eq!(delta, 2272.5);
        assert_eq!(slice_under_pointer(delta, 8), 5);
    }

    #[test]
    fn every_index_lands_under_pointer() {
        for slices in 1..=24 {
            for index in 0..slices {
                for start in [0.0, 17.0, 359.9, 2272.5, 12_345.6] {
                    let delta = forward_delta(start, target_angle(index, slices), 6);
                    assert!(delta >= 2160.0 && delta < 2520.0, "delta {delta}");
                    assert_eq!(
                        slice_under_pointer(start + delta, slices),
                        index,
                        "slices={slices} index={index} start={start}"
                    );
                }
            }
        }
    }

    #[test]
    fn target_behind_current_still_moves_forward() {
        // Resting at 300, target 112.5 is "behind"; wrap forward instead.
        let delta = forward_delta(300.0, 112.5, 1);
        assert_eq!(delta, 360.0 + 172.5);
    }

    #[test]
    fn repeated_index_stays_within_one_extra_turn() {
        for slices in 1..=16 {
            for index in 0..slices {
                let target = target_angle(index, slices);
                let mut rotation = 0.0;
                for spin in 0..50 {
                    let delta = forward_delta(rotation, target, 6);
                    assert!(
                        (2160.0..2520.0).contains(&delta),
                        "slices={slices} index={index} spin={spin} delta={delta}"
                    );
                    rotation += delta;
                    assert_eq!(slice_under_pointer(rotation, slices), index);
                }
            }
        }
        // Seven slices drift a few ulps past the target after one turn.
        let drifted = 282.8571428571431 + 2520.0;
        let delta = forward_delta(drifted, target_angle(1, 7), 6);
        assert!((2160.0..2160.0 + 1e-6).contains(&delta), "delta {delta}");
    }

    #[test]
    fn single_slice_wheel() {
        assert_eq!(angle_per_slice(1), 360.0);
        assert_eq!(target_angle(0, 1), 180.0);
        assert_eq!(segment_at(725.0, 1), 0);
        assert_eq!(slice_under_pointer(123.0, 1), 0);
    }

    #[test]
    fn segments_follow_rotation_bands() {
        assert_eq!(segment_at(0.0, 8), 0);
        assert_eq!(segment_at(44.9, 8), 0);
        assert_eq!(segment_at(45.0, 8), 1);
        assert_eq!(segment_at(360.0 + 359.0, 8), 7);
    }

    #[test]
    fn layout_and_path() {
        let slices = layout(4);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[1].start_angle, 90.0);
        assert_eq!(slices[1].center_angle, 135.0);
        assert!(!slices[1].large_arc);
        assert!(SliceLayout::new(0, 1).large_arc);

        let path = slice_path(&slices[0], 100.0);
        assert!(path.starts_with("M 100 100 L 100 0 A 100 100 0 0 1 200 "));
        assert!(path.ends_with(" Z"));
    }
}
