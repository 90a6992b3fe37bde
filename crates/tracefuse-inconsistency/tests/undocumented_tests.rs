//! Integration tests for tracefuse-inconsistency

use tracefuse_domain::{Confidence, EndpointPair, EntityId, Metamodel, ModelEntity, TraceLink};
use tracefuse_inconsistency::{InconsistencyConfig, InconsistencyFilter, InconsistencyKind};

fn entities() -> Vec<ModelEntity> {
    vec![
        ModelEntity::new("A", "A").with_type("Component"),
        ModelEntity::new("B", "B").with_type("Component"),
        ModelEntity::new("C", "C").with_type("Interface"),
    ]
}

fn links() -> Vec<TraceLink> {
    // Two sentences mention B
    vec![
        TraceLink::new(EndpointPair::new("sentence-1", "B"), Confidence::no_evidence()),
        TraceLink::new(EndpointPair::new("sentence-4", "B"), Confidence::no_evidence()),
    ]
}

fn config(whitelist: &[&str]) -> InconsistencyConfig {
    InconsistencyConfig {
        minimum_links: 1,
        allowed_types: vec!["Component".to_string()],
        whitelist_patterns: whitelist.iter().map(|p| p.to_string()).collect(),
    }
}

#[test]
fn test_unlinked_component_is_reported() {
    let filter = InconsistencyFilter::new(config(&[])).unwrap();
    let entities = entities();
    let links = links();

    let found = filter.find_undocumented_for_links(Metamodel::Architecture, &links, &entities);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entity_id, EntityId::new("A"));
    assert_eq!(found[0].kind, InconsistencyKind::MissingTextForModelElement);
    assert_eq!(found[0].metamodel, Metamodel::Architecture);
    assert_eq!(found[0].link_count, 0);
}

#[test]
fn test_whitelisted_component_is_not_reported() {
    let filter = InconsistencyFilter::new(config(&["A.*"])).unwrap();
    let entities = entities();
    let links = links();

    let found = filter.find_undocumented_for_links(Metamodel::Architecture, &links, &entities);

    assert!(found.is_empty());
}

#[test]
fn test_whitelist_matching_other_entities_keeps_the_rest() {
    let filter = InconsistencyFilter::new(config(&["B.*", "Z"])).unwrap();
    let entities = entities();
    let links = links();

    let found = filter.find_undocumented_for_links(Metamodel::Architecture, &links, &entities);
    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();

    assert_eq!(names, vec!["A"]);
}

#[test]
fn test_links_from_several_sources_count_as_one_target() {
    let filter = InconsistencyFilter::new(InconsistencyConfig {
        minimum_links: 2,
        ..config(&[])
    })
    .unwrap();
    let entities = entities();
    let links = links();

    let found = filter.find_undocumented_for_links(Metamodel::Architecture, &links, &entities);
    let flagged: Vec<(&str, usize)> = found.iter().map(|i| (i.entity_id.as_str(), i.link_count)).collect();

    // B is reached from two sentences but is a single linked target
    assert_eq!(flagged, vec![("A", 0), ("B", 1)]);
}

#[test]
fn test_default_types_include_component_subtypes() {
    let filter = InconsistencyFilter::new(InconsistencyConfig::default()).unwrap();
    let entities = vec![
        ModelEntity::new("1", "Renderer").with_type("BasicComponent"),
        ModelEntity::new("2", "Facade").with_type("CompositeComponent"),
        ModelEntity::new("3", "Api").with_type("OperationInterface"),
    ];

    let found = filter.find_undocumented(Metamodel::Architecture, Vec::new(), &entities);
    let ids: Vec<&str> = found.iter().map(|i| i.entity_id.as_str()).collect();

    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let err = InconsistencyFilter::new(config(&["[unclosed"])).unwrap_err();
    assert!(err.to_string().contains("[unclosed"));
}
