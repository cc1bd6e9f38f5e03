//! Property-based invariant tests for geometry primitives (Rect, Rotation, Anchor).
//!
//! 1. Trim is idempotent and trimming by self is identity.
//! 2. Trim result is enclosed by both inputs and never inverted.
//! 3. Overlap agrees with a non-empty trim.
//! 4. Point membership agrees with trim membership.
//! 5. Point enumeration yields exactly `width * height` distinct members.
//! 6. Four quarter turns are the identity; a rotation and its inverse cancel.
//! 7. Rotated coordinates stay inside the rotated bounds.
//! 8. Anchor offsets stay within `[0, d]` for non-negative slack.

use std::collections::HashSet;

use pixl_core::{Anchor, Flip, Rect, Rotation, Vec2};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Well-formed rectangles (`right >= left`, `bottom >= top`).
fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-50i32..50, -50i32..50, 0i32..40, 0i32..40)
        .prop_map(|(x, y, w, h)| Rect::sized(Vec2::new(x, y), Vec2::new(w, h)))
}

fn size_strategy() -> impl Strategy<Value = Vec2> {
    (1i32..12, 1i32..12).prop_map(|(w, h)| Vec2::new(w, h))
}

fn rotation_strategy() -> impl Strategy<Value = Rotation> {
    (0i32..4).prop_map(Rotation::from_quarter_turns)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Trim
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn trim_is_idempotent(a in rect_strategy(), b in rect_strategy()) {
        let once = a.trim(&b);
        prop_assert_eq!(once.trim(&b), once);
    }

    #[test]
    fn trim_by_self_is_identity(a in rect_strategy()) {
        prop_assert_eq!(a.trim(&a), a);
    }

    #[test]
    fn trim_is_never_inverted(a in rect_strategy(), b in rect_strategy()) {
        let t = a.trim(&b);
        prop_assert!(t.right >= t.left, "inverted horizontally: {:?}", t);
        prop_assert!(t.bottom >= t.top, "inverted vertically: {:?}", t);
    }

    #[test]
    fn non_empty_trim_is_enclosed_by_both(a in rect_strategy(), b in rect_strategy()) {
        let t = a.trim(&b);
        if !t.is_empty() {
            prop_assert!(a.encloses(&t));
            prop_assert!(b.encloses(&t));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Overlap, membership, enumeration
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlap_agrees_with_trim(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), !a.trim(&b).is_empty());
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn point_membership_agrees_with_trim(
        a in rect_strategy(),
        b in rect_strategy(),
        x in -60i32..60,
        y in -60i32..60,
    ) {
        let p = Vec2::new(x, y);
        prop_assert_eq!(a.has_point(p) && b.has_point(p), a.trim(&b).has_point(p));
    }

    #[test]
    fn enumeration_matches_area(a in rect_strategy()) {
        let points: Vec<Vec2> = a.points().collect();
        prop_assert_eq!(points.len() as i64, a.size().area());
        let unique: HashSet<Vec2> = points.iter().copied().collect();
        prop_assert_eq!(unique.len(), points.len());
        prop_assert!(points.iter().all(|p| a.has_point(*p)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7. Rotation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn four_quarter_turns_are_identity(size in size_strategy(), x in 0i32..12, y in 0i32..12) {
        let mut p = Vec2::new(x % size.x, y % size.y);
        let start = p;
        let mut s = size;
        for _ in 0..4 {
            p = Rotation::Deg90.apply(p, s);
            s = Rotation::Deg90.rotate_size(s);
        }
        prop_assert_eq!(s, size);
        prop_assert_eq!(p, start);
    }

    #[test]
    fn rotation_and_inverse_cancel(
        rotation in rotation_strategy(),
        size in size_strategy(),
        x in 0i32..12,
        y in 0i32..12,
    ) {
        let p = Vec2::new(x % size.x, y % size.y);
        let rotated = rotation.apply(p, size);
        let back = rotation.inverse().apply(rotated, rotation.rotate_size(size));
        prop_assert_eq!(back, p);
    }

    #[test]
    fn rotated_points_stay_in_bounds(rotation in rotation_strategy(), size in size_strategy()) {
        let target = Rect::from_size(rotation.rotate_size(size));
        let mut seen = HashSet::new();
        for p in Rect::from_size(size).points() {
            let q = rotation.apply(p, size);
            prop_assert!(target.has_point(q), "{:?} -> {:?} outside {:?}", p, q, target);
            prop_assert!(seen.insert(q), "rotation is not a bijection at {:?}", q);
        }
    }

    #[test]
    fn flips_are_involutions(size in size_strategy(), x in 0i32..12, y in 0i32..12) {
        let p = Vec2::new(x % size.x, y % size.y);
        for flip in [Flip::Horizontal, Flip::Vertical] {
            prop_assert_eq!(flip.apply(flip.apply(p, size), size), p);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Anchor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchor_offset_within_slack(bits in 0u8..16, dx in 0i32..200, dy in 0i32..200) {
        let anchor = Anchor::from_bits_truncate(bits);
        let offset = anchor.apply(Vec2::new(dx, dy));
        prop_assert!((0..=dx).contains(&offset.x));
        prop_assert!((0..=dy).contains(&offset.y));
    }

    #[test]
    fn centered_bias_differs_by_parity(d in -200i32..200) {
        let low = Anchor::CENTER.horizontal(d);
        let high = (Anchor::CENTER | Anchor::RIGHT).horizontal(d);
        prop_assert_eq!(high - low, d.rem_euclid(2));
        prop_assert_eq!(low + high, d);
    }
}
