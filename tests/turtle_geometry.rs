// tests/turtle_geometry.rs
use glam::Vec2;
use lsys_turtle::{
    DrawingParameters, InterpretationMap, LSystem, LSystemError, RuleTable, SpatialIndex, Turtle,
    TurtleOp, VertexKind, compute_vertices,
};

fn setup() -> (InterpretationMap, DrawingParameters) {
    let map = InterpretationMap::new()
        .with_op('F', TurtleOp::Forward)
        .with_op('+', TurtleOp::TurnLeft)
        .with_op('-', TurtleOp::TurnRight)
        .with_op('[', TurtleOp::Push)
        .with_op(']', TurtleOp::Pop);

    let params = DrawingParameters {
        starting_position: Vec2::ZERO,
        starting_angle: 0.0,
        delta_angle: 90.0f32.to_radians(),
        step: 10.0,
        iterations: 0,
    };
    (map, params)
}

#[test]
fn test_square_closes_on_itself() {
    let (map, params) = setup();
    let counts = vec![0; 7];
    let geometry = Turtle::new(&params, &counts).run("F+F+F+F", &map).unwrap();

    assert_eq!(geometry.forward_vertices().count(), 4);
    assert_eq!(geometry.vertices.len(), geometry.generations.len());

    // Right angles: (10,0) -> (10,10) -> (0,10) -> (0,0)
    let forward: Vec<Vec2> = geometry.forward_vertices().map(|v| v.position).collect();
    assert!(forward[0].abs_diff_eq(Vec2::new(10.0, 0.0), 1e-4));
    assert!(forward[1].abs_diff_eq(Vec2::new(10.0, 10.0), 1e-4));
    assert!(forward[2].abs_diff_eq(Vec2::new(0.0, 10.0), 1e-4));

    let first = geometry.vertices.first().unwrap();
    let last = geometry.vertices.last().unwrap();
    assert_eq!(first.kind, VertexKind::Origin);
    assert!(last.position.abs_diff_eq(first.position, 1e-4));
}

#[test]
fn test_pop_restores_pre_push_cursor() {
    let (map, params) = setup();
    let counts = vec![0; 5];
    let geometry = Turtle::new(&params, &counts).run("[+F]F", &map).unwrap();

    let forward: Vec<Vec2> = geometry.forward_vertices().map(|v| v.position).collect();
    assert_eq!(forward.len(), 2);
    // Branch went up; the trunk continues right from the origin, unaffected by the turn.
    assert!(forward[0].abs_diff_eq(Vec2::new(0.0, 10.0), 1e-4));
    assert!(forward[1].abs_diff_eq(Vec2::new(10.0, 0.0), 1e-4));
}

#[test]
fn test_branch_then_trunk_share_position() {
    let (map, params) = setup();
    let geometry = Turtle::new(&params, &[0; 4]).run("[F]F", &map).unwrap();

    let forward: Vec<Vec2> = geometry.forward_vertices().map(|v| v.position).collect();
    assert_eq!(forward.len(), 2);
    assert!(forward[1].abs_diff_eq(Vec2::new(10.0, 0.0), 1e-4));
    assert_eq!(geometry.vertices.len(), geometry.generations.len());
}

#[test]
fn test_unmatched_pop_is_stack_underflow() {
    let (map, params) = setup();
    let result = Turtle::new(&params, &[0, 0]).run("]F", &map);
    assert_eq!(result, Err(LSystemError::StackUnderflow { position: 0 }));
}

#[test_log::test]
fn test_underflow_does_not_corrupt_lsystem() {
    let (map, params) = setup();
    let mut lsys = LSystem::new("F]", RuleTable::new(), []);

    let result = compute_vertices(&mut lsys, &map, &params);
    assert!(matches!(result, Err(LSystemError::StackUnderflow { position: 1 })));

    lsys.set_axiom("[F]");
    let geometry = compute_vertices(&mut lsys, &map, &params).unwrap();
    assert_eq!(geometry.forward_vertices().count(), 1);
}

#[test]
fn test_unmapped_symbols_are_no_ops() {
    let (map, params) = setup();
    let geometry = Turtle::new(&params, &[0; 5]).run("XFYZ+", &map).unwrap();
    assert_eq!(geometry.len(), 2);
}

#[test]
fn test_generations_follow_production() {
    let (map, mut params) = setup();
    let mut rules = RuleTable::new();
    rules.add_rule('F', "F+F").unwrap();
    let mut lsys = LSystem::new("F", rules, ['F']);
    params.iterations = 3;

    let geometry = compute_vertices(&mut lsys, &map, &params).unwrap();
    assert_eq!(geometry.forward_vertices().count(), 8);
    assert_eq!(geometry.max_generation, 3);
    assert!(geometry.generations.iter().all(|&g| g == 3));
}

#[test]
fn test_dragon_curve_is_hit_testable() {
    let (map, mut params) = setup();
    let map = map.with_op('G', TurtleOp::Forward);
    let mut rules = RuleTable::new();
    rules.add_rule('F', "F+G").unwrap();
    rules.add_rule('G', "F-G").unwrap();
    let mut lsys = LSystem::new("F", rules, ['F', 'G']);
    params.iterations = 10;

    let geometry = compute_vertices(&mut lsys, &map, &params).unwrap();
    assert_eq!(geometry.forward_vertices().count(), 1 << 10);

    let index = SpatialIndex::build(&geometry.vertices, 10).unwrap();
    assert!(index.sub_boxes.len() <= 10);
    for v in &geometry.vertices {
        assert!(index.point_inside(v.position));
        assert!(index.bounding_box.contains(v.position));
    }
    let far = index.bounding_box.max + Vec2::splat(1.0);
    assert!(!index.point_inside(far));
}
