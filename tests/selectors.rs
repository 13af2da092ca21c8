//! End-to-end tests for the three selectors.
//!
//! Every scenario checks the cross-cutting invariant through the resolution
//! filter: applying the returned description to confusors + referent must
//! yield exactly the referent.

use std::time::Duration;

use oxigraph::model::vocab::rdf;
use oxigraph::model::{GraphName, Literal, NamedNode, Quad, Term};
use oxigraph::store::Store;

use refex::error::SelectError;
use refex::expression::ReferringExpression;
use refex::priorities::PriorityConfig;
use refex::resolver;
use refex::select::Selector;
use refex::select::constraint::ConstraintSelector;
use refex::select::graph::GraphSelector;
use refex::select::incremental::IncrementalSelector;
use refex::store::local_name;

fn iri(s: &str) -> NamedNode {
    NamedNode::new(s).unwrap()
}

fn lit(s: &str) -> Literal {
    Literal::new_simple_literal(s)
}

fn insert(store: &Store, s: &NamedNode, p: &NamedNode, o: impl Into<Term>) {
    store
        .insert(&Quad::new(
            s.clone(),
            p.clone(),
            o.into(),
            GraphName::DefaultGraph,
        ))
        .unwrap();
}

/// The description must pick out exactly the referent among all entities.
fn assert_resolves_to_referent(
    expr: &ReferringExpression,
    referent: &NamedNode,
    confusors: &[NamedNode],
    store: &Store,
) {
    let mut candidates = confusors.to_vec();
    candidates.push(referent.clone());
    let resolved = resolver::resolve(expr, &candidates, store).unwrap();
    assert_eq!(resolved, vec![referent.clone()], "description: {expr}");
}

// ---------------------------------------------------------------------------
// Scenario: three balls (incremental)
// ---------------------------------------------------------------------------

fn ball_scene() -> (Store, NamedNode, Vec<NamedNode>, PriorityConfig) {
    let store = Store::new().unwrap();
    let referent = iri("http://example.org/redmiddle");
    let confusor1 = iri("http://example.org/ballfar");
    let confusor2 = iri("http://example.org/redballclose");
    let ball = iri("http://example.org/ball");
    let color = iri("http://example.org/color");
    let distance = iri("http://example.org/distance");
    let ty = rdf::TYPE.into_owned();

    insert(&store, &referent, &ty, ball.clone());
    insert(&store, &confusor1, &ty, ball.clone());
    insert(&store, &confusor2, &ty, ball.clone());
    insert(&store, &referent, &color, lit("red"));
    insert(&store, &confusor1, &color, lit("black"));
    insert(&store, &confusor2, &color, lit("red"));
    insert(&store, &referent, &distance, lit("middle"));
    insert(&store, &confusor1, &distance, lit("far"));
    insert(&store, &confusor2, &distance, lit("close"));

    let config =
        PriorityConfig::new().with_priorities(ball.as_str(), &["type", "color", "distance"]);
    (store, referent, vec![confusor1, confusor2], config)
}

#[test]
fn incremental_selects_color_then_distance() {
    let (store, referent, confusors, config) = ball_scene();
    let selector = IncrementalSelector::new(config);
    let expr = selector.resolve(&referent, &confusors, &store).unwrap();

    assert!(!expr.has_negatives());
    assert_eq!(expr.predicates().len(), 2);
    assert_eq!(local_name(expr.predicates()[0].predicate()), "color");
    assert_eq!(local_name(expr.predicates()[1].predicate()), "distance");
    assert_resolves_to_referent(&expr, &referent, &confusors, &store);
}

#[test]
fn incremental_is_deterministic() {
    let (store, referent, confusors, config) = ball_scene();
    let selector = IncrementalSelector::new(config);
    let first = selector.resolve(&referent, &confusors, &store).unwrap();
    let second = selector.resolve(&referent, &confusors, &store).unwrap();
    assert_eq!(first.predicates(), second.predicates());
}

#[test]
fn incremental_rejects_untyped_referent() {
    let (store, _, confusors, config) = ball_scene();
    let untyped = iri("http://example.org/mystery");
    let color = iri("http://example.org/color");
    insert(&store, &untyped, &color, lit("green"));

    let selector = IncrementalSelector::new(config);
    let err = selector.resolve(&untyped, &confusors, &store).unwrap_err();
    assert!(matches!(err, SelectError::UnknownReferentType { .. }));
}

#[test]
fn incremental_rejects_type_without_priorities() {
    let (store, referent, confusors, _) = ball_scene();
    let config = PriorityConfig::new().with_priorities("http://example.org/cube", &["color"]);
    let selector = IncrementalSelector::new(config);
    let err = selector.resolve(&referent, &confusors, &store).unwrap_err();
    assert!(matches!(err, SelectError::NoPrioritiesForType { .. }));
}

// ---------------------------------------------------------------------------
// Scenario: board members (constraint)
// ---------------------------------------------------------------------------

fn board_scene() -> (Store, NamedNode, Vec<NamedNode>, PriorityConfig, NamedNode) {
    let store = Store::new().unwrap();
    let ty = rdf::TYPE.into_owned();
    let person = iri("http://example.org/person");
    let member = iri("http://example.org/member");
    let board = iri("http://example.org/boardmember");
    let president = iri("http://example.org/president");
    let secretary = iri("http://example.org/secretary");
    let treasurer = iri("http://example.org/treasurer");

    let entities: Vec<NamedNode> = (1..=6)
        .map(|i| iri(&format!("http://example.org/x{i}")))
        .collect();
    for (i, entity) in entities.iter().enumerate() {
        insert(&store, entity, &ty, person.clone());
        insert(&store, entity, &ty, member.clone());
        if i != 5 {
            insert(&store, entity, &ty, board.clone());
        }
    }
    insert(&store, &entities[0], &ty, president);
    insert(&store, &entities[1], &ty, secretary);
    insert(&store, &entities[2], &ty, treasurer);

    let config = PriorityConfig::new().with_priorities(person.as_str(), &["type"]);
    let referent = entities[5].clone();
    let confusors = entities[..5].to_vec();
    (store, referent, confusors, config, board)
}

#[test]
fn constraint_finds_single_negative_description() {
    let (store, referent, confusors, config, board) = board_scene();
    let selector = ConstraintSelector::new(config);
    let expr = selector.resolve(&referent, &confusors, &store).unwrap();

    assert!(expr.has_negatives());
    assert_eq!(expr.predicates().len(), 1);
    assert!(expr.predicates()[0].is_negative());
    assert_eq!(expr.predicates()[0].object(), Some(&Term::from(board)));
    assert_resolves_to_referent(&expr, &referent, &confusors, &store);
}

#[test]
fn constraint_is_deterministic() {
    let (store, referent, confusors, config, _) = board_scene();
    let selector = ConstraintSelector::new(config);
    let first = selector.resolve(&referent, &confusors, &store).unwrap();
    let second = selector.resolve(&referent, &confusors, &store).unwrap();
    assert_eq!(first.predicates(), second.predicates());
}

#[test]
fn constraint_result_is_minimal() {
    // Neither color nor size alone separates both confusors; the selector
    // must return exactly two predicates, never three.
    let store = Store::new().unwrap();
    let ty = rdf::TYPE.into_owned();
    let thing = iri("http://example.org/thing");
    let color = iri("http://example.org/color");
    let size = iri("http://example.org/size");
    let referent = iri("http://example.org/r");
    let c1 = iri("http://example.org/c1");
    let c2 = iri("http://example.org/c2");

    for e in [&referent, &c1, &c2] {
        insert(&store, e, &ty, thing.clone());
    }
    insert(&store, &referent, &color, lit("red"));
    insert(&store, &referent, &size, lit("big"));
    insert(&store, &c1, &color, lit("red"));
    insert(&store, &c1, &size, lit("small"));
    insert(&store, &c2, &color, lit("blue"));
    insert(&store, &c2, &size, lit("big"));

    let config =
        PriorityConfig::new().with_priorities(thing.as_str(), &["type", "color", "size"]);
    let selector = ConstraintSelector::new(config);
    let confusors = vec![c1, c2];
    let expr = selector.resolve(&referent, &confusors, &store).unwrap();

    assert_eq!(expr.predicates().len(), 2);
    assert_resolves_to_referent(&expr, &referent, &confusors, &store);
}

// ---------------------------------------------------------------------------
// Scenario: chihuahuas and doghouses (graph)
// ---------------------------------------------------------------------------

fn chihuahua_scene() -> (Store, NamedNode, Vec<NamedNode>, PriorityConfig) {
    let store = Store::new().unwrap();
    let d: Vec<NamedNode> = (1..=4)
        .map(|i| iri(&format!("http://example.org/d{i}")))
        .collect();
    let dog = iri("http://example.org/dog");
    let chihuahua = iri("http://example.org/chihuahua");
    let doghouse = iri("http://example.org/doghouse");
    let small = iri("http://example.org/small");
    let large = iri("http://example.org/large");
    let brown = iri("http://example.org/brown");
    let white = iri("http://example.org/white");
    let left_of = iri("http://example.org/left_of");
    let right_of = iri("http://example.org/right_of");
    let next_to = iri("http://example.org/next_to");
    let contains = iri("http://example.org/contains");
    let inside = iri("http://example.org/in");

    for i in [0, 1] {
        for p in [&dog, &small, &brown, &chihuahua] {
            insert(&store, &d[i], p, d[i].clone());
        }
    }
    for i in [2, 3] {
        for p in [&doghouse, &white, &large] {
            insert(&store, &d[i], p, d[i].clone());
        }
    }

    insert(&store, &d[0], &next_to, d[1].clone());
    insert(&store, &d[0], &left_of, d[1].clone());
    insert(&store, &d[1], &next_to, d[0].clone());
    insert(&store, &d[1], &right_of, d[0].clone());
    insert(&store, &d[0], &inside, d[2].clone());
    insert(&store, &d[2], &contains, d[0].clone());
    insert(&store, &d[1], &next_to, d[3].clone());
    insert(&store, &d[1], &left_of, d[3].clone());
    insert(&store, &d[3], &next_to, d[1].clone());
    insert(&store, &d[3], &right_of, d[1].clone());
    insert(&store, &d[2], &next_to, d[3].clone());
    insert(&store, &d[2], &left_of, d[3].clone());
    insert(&store, &d[3], &next_to, d[2].clone());
    insert(&store, &d[3], &right_of, d[2].clone());

    let prio = [
        "dog", "small", "large", "brown", "white", "left_of", "right_of", "next_to",
        "contains", "in",
    ];
    let config = PriorityConfig::new()
        .with_priorities(dog.as_str(), &prio)
        .with_priorities(doghouse.as_str(), &prio);

    let referent = d[0].clone();
    let confusors = d[1..].to_vec();
    (store, referent, confusors, config)
}

#[test]
fn graph_finds_the_containment_edge() {
    let (store, referent, confusors, config) = chihuahua_scene();
    let selector = GraphSelector::new(config);
    let expr = selector.resolve(&referent, &confusors, &store).unwrap();

    assert!(!expr.has_negatives());
    assert_eq!(expr.predicates().len(), 1);
    assert_eq!(local_name(expr.predicates()[0].predicate()), "in");
    assert_resolves_to_referent(&expr, &referent, &confusors, &store);
}

#[test]
fn graph_is_deterministic() {
    let (store, referent, confusors, config) = chihuahua_scene();
    let selector = GraphSelector::new(config);
    let first = selector.resolve(&referent, &confusors, &store).unwrap();
    let second = selector.resolve(&referent, &confusors, &store).unwrap();
    assert_eq!(first.predicates(), second.predicates());
}

#[test]
fn graph_zero_budget_fails_with_timeout() {
    let (store, referent, confusors, config) = chihuahua_scene();
    let selector = GraphSelector::new(config).with_timeout(Duration::ZERO);
    let err = selector.resolve(&referent, &confusors, &store).unwrap_err();
    assert!(matches!(err, SelectError::Timeout { budget_ms: 0 }));
}

// ---------------------------------------------------------------------------
// Cross-selector properties
// ---------------------------------------------------------------------------

#[test]
fn every_selector_aborts_on_uninformative_confusor() {
    let (store, referent, mut confusors, config) = ball_scene();
    confusors.push(iri("http://example.org/ghost"));

    let selectors: Vec<Box<dyn Selector>> = vec![
        Box::new(IncrementalSelector::new(config.clone())),
        Box::new(ConstraintSelector::new(config.clone())),
        Box::new(GraphSelector::new(config)),
    ];
    for selector in selectors {
        let err = selector.resolve(&referent, &confusors, &store).unwrap_err();
        assert!(matches!(err, SelectError::NoInformationForConfusor { .. }));
    }
}

#[test]
fn every_selector_resolves_the_ball_scene_to_the_referent() {
    let (store, referent, confusors, config) = ball_scene();

    let selectors: Vec<Box<dyn Selector>> = vec![
        Box::new(IncrementalSelector::new(config.clone())),
        Box::new(ConstraintSelector::new(config.clone())),
        Box::new(GraphSelector::new(config)),
    ];
    for selector in selectors {
        let expr = selector.resolve(&referent, &confusors, &store).unwrap();
        assert_resolves_to_referent(&expr, &referent, &confusors, &store);
    }
}
