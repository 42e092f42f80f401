use polarwave_core::Point2D;
use polarwave_motion::{
    split_move, DirectCartesianSink, KinematicsTransform, PolargraphGeometry,
    RelativeMotionCursor,
};
use proptest::prelude::*;

fn geometry() -> PolargraphGeometry {
    PolargraphGeometry::new(1340.0, 900.0, 5000.0).unwrap()
}

proptest! {
    #[test]
    fn mirrored_targets_swap_actuators(
        separation in 100.0f64..3000.0,
        slack in 1.0f64..2000.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..0.0,
    ) {
        let g = PolargraphGeometry::new(separation, separation / 2.0 + slack, 3000.0).unwrap();
        let p = Point2D::new(x, y);
        let direct = g.to_actuator(p);
        let mirrored = g.to_actuator(p.mirror_x());
        prop_assert!((direct.a - mirrored.b).abs() < 1e-9);
        prop_assert!((direct.b - mirrored.a).abs() < 1e-9);
    }

    #[test]
    fn inverse_recovers_reachable_targets(x in -600.0f64..600.0, y in -800.0f64..550.0) {
        let g = geometry();
        let p = Point2D::new(x, y);
        let back = g.to_cartesian(g.to_actuator(p));
        prop_assert!(back.distance_to(&p) < 1e-6, "{} -> {}", p, back);
    }

    #[test]
    fn splitter_count_collinearity_and_spacing(
        ax in -500.0f64..500.0, ay in -500.0f64..500.0,
        bx in -500.0f64..500.0, by in -500.0f64..500.0,
        threshold in 0.5f64..50.0,
    ) {
        let from = Point2D::new(ax, ay);
        let to = Point2D::new(bx, by);
        let distance = from.distance_to(&to);
        let points = split_move(from, to, threshold);

        let expected = (distance / threshold).floor() as usize;
        prop_assert_eq!(points.len(), expected);

        for p in &points {
            let via = from.distance_to(p) + p.distance_to(&to);
            prop_assert!((via - distance).abs() < 1e-6);
        }

        if expected > 0 {
            let step = distance / expected as f64;
            let mut path = points.clone();
            path.push(to);
            for pair in path.windows(2) {
                let hop = pair[0].distance_to(&pair[1]);
                prop_assert!((hop - step).abs() < 1e-6);
                prop_assert!(hop < 2.0 * threshold);
            }
        }
    }

    #[test]
    fn full_turn_keeps_heading(start in -720.0f64..720.0) {
        let mut cursor = RelativeMotionCursor::new(DirectCartesianSink::new());
        cursor.set_heading(start);
        let before = cursor.heading();
        cursor.turn(360.0);
        let after = cursor.heading();
        let diff = (after - before).abs();
        prop_assert!(diff < 1e-9 || (diff - std::f64::consts::TAU).abs() < 1e-9);
        prop_assert!((0.0..std::f64::consts::TAU).contains(&after));
    }

    #[test]
    fn zero_moves_keep_position(heading in 0.0f64..360.0, repeats in 1usize..10) {
        let mut cursor = RelativeMotionCursor::new(DirectCartesianSink::new());
        cursor.move_to(Point2D::new(12.0, -3.0)).unwrap();
        cursor.set_heading(heading);
        for _ in 0..repeats {
            cursor.move_by(0.0).unwrap();
        }
        prop_assert_eq!(cursor.position(), Point2D::new(12.0, -3.0));
    }
}

#[test]
fn test_home_is_equidistant() {
    let coords = geometry().to_actuator(Point2D::ORIGIN);
    assert!((coords.a - coords.b).abs() < 1e-12);
    // Both cables hang at their nominal 900 mm at home.
    assert!(coords.a.abs() < 1e-9);
}
