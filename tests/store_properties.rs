//! Behavioural properties of the requirement store, exercised through the
//! public API only.

use std::collections::HashSet;

use sententia::{
    storage::{Dataset, Fixture, FixtureRecord},
    Config, LinkType, Priority, RequirementInput, RequirementStore, Status, StoreError, TraceEdge,
};
use serde_json::json;
use test_case::test_case;

fn input(value: serde_json::Value) -> RequirementInput {
    serde_json::from_value(value).unwrap()
}

fn minimal(description: &str) -> RequirementInput {
    input(json!({
        "type": "Functional",
        "description": description,
        "source": "Document",
        "priority": "Medium",
        "status": "Draft",
    }))
}

#[test]
fn display_ids_are_unique() {
    let store = RequirementStore::new();

    let ids: HashSet<_> = (0..100)
        .map(|i| {
            store
                .create(minimal(&format!("requirement {i}")))
                .unwrap()
                .display_id()
                .to_string()
        })
        .collect();

    assert_eq!(ids.len(), 100);
    assert_eq!(store.len(), 100);
}

#[test]
fn every_update_appends_exactly_one_snapshot() {
    let store = RequirementStore::new();
    let id = store.create(minimal("v0")).unwrap().display_id().to_string();

    for n in 1..=5 {
        let updated = store.update(&id, minimal(&format!("v{n}"))).unwrap();
        assert_eq!(updated.versions().len(), n);
    }

    let versions = store.get(&id).unwrap().versions().to_vec();
    let descriptions: Vec<_> = versions.iter().map(|v| v.data().description.clone()).collect();
    assert_eq!(descriptions, ["v0", "v1", "v2", "v3", "v4"]);
    assert!(versions.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
}

#[test]
fn snapshot_holds_the_previous_classification() {
    let store = RequirementStore::new();
    let created = store
        .create(input(json!({
            "layer": "System",
            "type": "Constraint",
            "description": "before",
            "rationale": "why",
            "source": "Regulation",
            "priority": "High",
            "status": "Approved",
            "verification": "inspection",
        })))
        .unwrap();

    let updated = store.update(created.display_id(), minimal("after")).unwrap();

    let snapshot = updated.versions()[0].data();
    assert_eq!(snapshot.description, "before");
    assert_eq!(snapshot.rationale.as_deref(), Some("why"));
    assert_eq!(snapshot.priority, Priority::High);
    assert_eq!(snapshot.status, Status::Approved);
    assert_eq!(snapshot.verification.as_deref(), Some("inspection"));
    assert_eq!(updated.description(), "after");
    assert_eq!(updated.rationale(), None);
}

#[test]
fn update_replaces_rather_than_merges() {
    let store = RequirementStore::new();
    let mut linked = minimal("linked");
    linked.rationale = Some("kept?".to_string());
    linked.links = Some(vec![serde_json::from_value(
        json!({"target_id": "REQ-00000099", "type": "Refines"}),
    )
    .unwrap()]);
    let created = store.create(linked).unwrap();
    assert_eq!(created.links().len(), 1);

    let updated = store.update(created.display_id(), minimal("bare")).unwrap();

    assert!(updated.links().is_empty());
    assert_eq!(updated.rationale(), None);
}

#[test]
fn dangling_links_are_tolerated() {
    let store = RequirementStore::new();
    let created = store
        .create(input(json!({
            "type": "Functional",
            "description": "points nowhere",
            "source": "Developer",
            "priority": "Low",
            "status": "Draft",
            "links": [{"target_id": "NOPE-1", "type": "ConflictsWith"}],
        })))
        .unwrap();

    let edges = store.export_edges();
    assert_eq!(
        edges,
        [TraceEdge::new(created.display_id(), LinkType::ConflictsWith, "NOPE-1")]
    );
    assert_eq!(store.traceability_graph().dangling(), edges);
}

#[test]
fn deleting_a_target_leaves_links_in_place() {
    let store = RequirementStore::new();
    let target = store.create(minimal("target")).unwrap();
    let mut source = minimal("source");
    source.links = Some(vec![serde_json::from_value(
        json!({"target_id": target.display_id(), "type": "DependsOn"}),
    )
    .unwrap()]);
    let source = store.create(source).unwrap();

    store.delete(target.display_id()).unwrap();

    assert_eq!(store.get(source.display_id()).unwrap().links().len(), 1);
    assert_eq!(store.traceability_graph().dangling().len(), 1);
}

#[test]
fn create_get_update_delete_round_trip() {
    let store = RequirementStore::new();

    let created = store.create(minimal("first")).unwrap();
    let id = created.display_id().to_string();
    assert_eq!(store.get(&id).unwrap(), created);

    let updated = store.update(&id, minimal("second")).unwrap();
    assert_eq!(store.get(&id).unwrap(), updated);
    assert_eq!(updated.versions().len(), 1);

    assert_eq!(store.delete(&id).unwrap(), updated);
    assert_eq!(store.get(&id), Err(StoreError::NotFound(id.clone())));
    assert_eq!(store.delete(&id), Err(StoreError::NotFound(id)));
}

#[test]
fn export_is_a_pure_projection_of_links() {
    let store = RequirementStore::with_config(&Config::new("R", 0));
    let mut r1 = minimal("R1");
    r1.links = Some(vec![serde_json::from_value(
        json!({"target_id": "R2", "type": "DependsOn"}),
    )
    .unwrap()]);
    store
        .load_fixture(Fixture::new(
            "R",
            vec![
                FixtureRecord::new(r1).with_key("R1"),
                FixtureRecord::new(minimal("R2")).with_key("R2"),
            ],
        ))
        .unwrap();

    let expected = [TraceEdge::new("R-1", LinkType::DependsOn, "R-2")];
    assert_eq!(store.export_edges(), expected);
    assert_eq!(store.export_edges(), expected);
}

#[test_case("priority", "Critical")]
#[test_case("status", "Done")]
#[test_case("type", "functional")]
#[test_case("source", "Customer")]
#[test_case("layer", "Hardware")]
fn out_of_vocabulary_values_are_rejected(field: &str, value: &str) {
    let store = RequirementStore::new();
    let mut payload = json!({
        "type": "Functional",
        "description": "d",
        "source": "Document",
        "priority": "Medium",
        "status": "Draft",
    });
    payload[field] = json!(value);

    let error = store.create(input(payload)).unwrap_err();

    let StoreError::Validation(validation) = &error else {
        panic!("expected a validation error, got {error:?}");
    };
    assert_eq!(validation.field(), field);
    assert!(store.is_empty());
}

#[test]
fn missing_required_field_is_rejected() {
    let store = RequirementStore::new();
    let mut payload = minimal("d");
    payload.source = None;

    let error = store.create(payload).unwrap_err();

    assert!(matches!(error, StoreError::Validation(e) if e.field() == "source"));
}

#[test]
fn status_change_is_versioned() {
    let store = RequirementStore::new();
    let created = store.create(minimal("review me")).unwrap();

    let rejected = store
        .set_status(created.display_id(), Status::Rejected)
        .unwrap();

    assert_eq!(rejected.status(), Status::Rejected);
    assert_eq!(rejected.description(), "review me");
    assert_eq!(rejected.versions().len(), 1);
}

#[test]
fn loading_a_fixture_replaces_previous_content() {
    let store = RequirementStore::new();
    let stale = store.create(minimal("stale")).unwrap();

    let loaded = store
        .load_fixture(Dataset::IceCream.fixture().unwrap())
        .unwrap();

    assert_eq!(loaded, 13);
    assert_eq!(store.len(), 13);
    assert!(store.get(stale.display_id()).is_err());
    assert_eq!(store.export_edges().len(), 11);
    assert!(store.traceability_graph().dangling().is_empty());

    let layers: HashSet<_> = store
        .get_all()
        .iter()
        .filter_map(|requirement| requirement.layer())
        .map(|layer| layer.to_string())
        .collect();
    assert_eq!(layers.len(), 4);
}

#[test]
fn invalid_fixture_leaves_store_untouched() {
    let store = RequirementStore::new();
    let kept = store.create(minimal("kept")).unwrap();
    let mut broken = minimal("broken");
    broken.priority = Some("Critical".to_string());

    let result = store.load_fixture(Fixture::new(
        "X",
        vec![
            FixtureRecord::new(minimal("fine")),
            FixtureRecord::new(broken),
        ],
    ));

    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(store.get_all(), [kept]);
}

#[test]
fn fixture_ids_stay_unique_across_datasets() {
    let store = RequirementStore::new();
    store
        .load_fixture(Dataset::DeathStar.fixture().unwrap())
        .unwrap();
    let first = ids(&store);
    store
        .load_fixture(Dataset::DeathStar.fixture().unwrap())
        .unwrap();

    assert_eq!(first[0], "REQ-DS-00000001");
    let second = ids(&store);
    assert_eq!(second[0], "REQ-DS-00000010");
    assert!(second.iter().all(|id| !first.contains(id)));
}

fn ids(store: &RequirementStore) -> Vec<String> {
    store
        .get_all()
        .iter()
        .map(|requirement| requirement.display_id().to_string())
        .collect()
}

#[test]
fn reloading_after_a_delete_never_repeats_an_id() {
    let store = RequirementStore::new();
    store
        .load_fixture(Dataset::IceCream.fixture().unwrap())
        .unwrap();
    let first = ids(&store);
    assert_eq!(first[0], "BUS-00000001");
    store.delete(&first[0]).unwrap();

    store
        .load_fixture(Dataset::IceCream.fixture().unwrap())
        .unwrap();

    assert!(store.get(&first[0]).is_err());
    let second = ids(&store);
    assert_eq!(second[0], "BUS-00000014");
    assert!(second.iter().all(|id| !first.contains(id)));
    assert!(store.traceability_graph().dangling().is_empty());
}

#[test]
fn fixture_never_reissues_a_created_id() {
    let store = RequirementStore::with_config(&Config::new("BUS", 3));
    let created = store.create(minimal("created")).unwrap();
    assert_eq!(created.display_id(), "BUS-001");
    store.delete(created.display_id()).unwrap();

    store
        .load_fixture(Dataset::IceCream.fixture().unwrap())
        .unwrap();

    assert!(store.get("BUS-001").is_err());
    let loaded = ids(&store);
    assert_eq!(loaded[0], "BUS-002");
    assert!(!loaded.contains(&created.display_id().to_string()));
    assert_eq!(loaded.iter().collect::<HashSet<_>>().len(), 13);
}
