// tests/persistence.rs
use lsys_turtle::{
    DrawingParameters, InterpretationMap, LSystem, LSystemSnapshot, RuleTable, ShapeConfig,
};

#[test]
fn test_snapshot_survives_json() {
    let mut rules = RuleTable::new();
    rules.add_rule('X', "F[+X][-X]FX").unwrap();
    rules.add_rule('F', "FF").unwrap();
    let mut lsys = LSystem::new("X", rules, ['X']);

    let json = serde_json::to_string(&lsys.snapshot()).unwrap();
    let restored: LSystemSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, lsys.snapshot());

    let mut reloaded = LSystem::from(restored);
    assert_eq!(lsys.produce(4).unwrap(), reloaded.produce(4).unwrap());
}

#[test]
fn test_rules_serialize_as_plain_map() {
    let mut rules = RuleTable::new();
    rules.add_rule('F', "F+G").unwrap();
    let value = serde_json::to_value(&rules).unwrap();
    assert_eq!(value, serde_json::json!({ "F": "F+G" }));
}

#[test]
fn test_drawing_configuration_round_trips() {
    let params = DrawingParameters {
        iterations: 5,
        ..DrawingParameters::default()
    };
    let map = InterpretationMap::standard();
    let config = ShapeConfig::default();

    let json = serde_json::to_string(&(&params, &map, &config)).unwrap();
    let (p, m, c): (DrawingParameters, InterpretationMap, ShapeConfig) =
        serde_json::from_str(&json).unwrap();
    assert_eq!(p, params);
    assert_eq!(m, map);
    assert_eq!(c, config);
}
