use polarwave_core::Point2D;
use polarwave_motion::{
    DirectCartesianSink, KinematicsSink, KinematicsTransform, MoveSplitter, PolargraphGeometry,
    PolargraphSink, RecordingDecorator, StrokeKind,
};

fn waypoints() -> Vec<Point2D> {
    vec![
        Point2D::new(40.0, 0.0),
        Point2D::new(40.0, 40.0),
        Point2D::new(-40.0, 40.0),
        Point2D::new(-40.0, -40.0),
        Point2D::new(40.0, -40.0),
    ]
}

#[test]
fn test_polargraph_log_replays_recorded_strokes() {
    let geometry = PolargraphGeometry::new(1340.0, 900.0, 5000.0).unwrap();
    let sink = PolargraphSink::new(geometry).with_splitter(MoveSplitter::disabled());
    let mut rec = RecordingDecorator::new(sink);

    rec.travel_to(waypoints()[0]).unwrap();
    for p in &waypoints()[1..] {
        rec.move_to(*p).unwrap();
    }

    let replayed: Vec<Point2D> = rec
        .command_log()
        .positions()
        .into_iter()
        .map(|c| geometry.to_cartesian(c))
        .collect();
    let recorded: Vec<Point2D> = rec.strokes().iter().map(|s| s.end).collect();

    assert_eq!(replayed.len(), recorded.len());
    for (a, b) in replayed.iter().zip(&recorded) {
        assert!(a.distance_to(b) < 1e-6, "{} != {}", a, b);
    }
    assert_eq!(rec.strokes()[0].kind, StrokeKind::Travel);
}

#[test]
fn test_cartesian_log_replays_exactly() {
    let mut rec = RecordingDecorator::new(DirectCartesianSink::new());
    for p in waypoints() {
        rec.move_to(p).unwrap();
    }

    let replayed: Vec<Point2D> = rec
        .command_log()
        .positions()
        .into_iter()
        .map(|c| Point2D::new(c.a, c.b))
        .collect();
    let recorded: Vec<Point2D> = rec.strokes().iter().map(|s| s.end).collect();
    assert_eq!(replayed, recorded);
}

#[test]
fn test_split_polargraph_move_example() {
    let geometry = PolargraphGeometry::new(1340.0, 900.0, 5000.0).unwrap();
    let mut sink = PolargraphSink::new(geometry);
    sink.move_to(Point2D::new(10.0, 0.0)).unwrap();

    let xs: Vec<f64> = sink
        .command_log()
        .positions()
        .into_iter()
        .map(|c| geometry.to_cartesian(c).x)
        .collect();
    assert_eq!(xs.len(), 3);
    for (x, expected) in xs.iter().zip([0.0, 5.0, 10.0]) {
        assert!((x - expected).abs() < 1e-6);
    }
}

#[test]
fn test_decorator_over_boxed_sink() {
    let inner: Box<dyn KinematicsSink> = Box::new(DirectCartesianSink::new());
    let mut rec = RecordingDecorator::new(inner);
    rec.move_to(Point2D::new(1.0, 2.0)).unwrap();
    assert_eq!(rec.inner().position(), Point2D::new(1.0, 2.0));
    assert_eq!(rec.strokes().len(), 1);
}
