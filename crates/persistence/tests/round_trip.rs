use proptest::prelude::*;
use tierlist_core::{BucketId, ImageRef, ItemId, ItemSize, Refinement, Workspace};
use tierlist_persistence::{export, import, Snapshot};

/// Builder steps for a reachable workspace; item indices wrap around the live items.
#[derive(Debug, Clone)]
enum Step {
    Add(String),
    Move(usize, usize),
    Refine(usize, Option<Refinement>),
    Resize(usize, i64, i64),
    Remove(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let refinement = prop_oneof![
        Just(None),
        Just(Some(Refinement::Plus)),
        Just(Some(Refinement::Minus)),
    ];
    prop_oneof![
        3 => "[a-z]{1,8}\\.png".prop_map(Step::Add),
        3 => (any::<usize>(), 0usize..10).prop_map(|(item, bucket)| Step::Move(item, bucket)),
        2 => (any::<usize>(), refinement).prop_map(|(item, r)| Step::Refine(item, r)),
        2 => (any::<usize>(), 0i64..200, 0i64..200).prop_map(|(item, w, h)| Step::Resize(item, w, h)),
        1 => any::<usize>().prop_map(Step::Remove),
    ]
}

fn build(steps: Vec<Step>) -> Workspace {
    let buckets: Vec<BucketId> = BucketId::all().collect();
    let mut workspace = Workspace::new();
    let mut ids: Vec<ItemId> = Vec::new();
    let pick = |ids: &[ItemId], index: usize| (!ids.is_empty()).then(|| ids[index % ids.len()]);

    for step in steps {
        match step {
            Step::Add(name) => ids.push(workspace.create_item(ImageRef::from_uri(name.clone()), name)),
            Step::Move(item, bucket) => {
                if let Some(id) = pick(&ids, item) {
                    workspace.move_item(id, buckets[bucket]).unwrap();
                }
            }
            Step::Refine(item, refinement) => {
                if let Some(id) = pick(&ids, item) {
                    workspace.set_sub_option(id, refinement).unwrap();
                }
            }
            Step::Resize(item, width, height) => {
                if let Some(id) = pick(&ids, item) {
                    workspace.resize_item(id, width, height).unwrap();
                }
            }
            Step::Remove(item) => {
                if let Some(id) = pick(&ids, item) {
                    ids.retain(|other| *other != id);
                    workspace.delete_item(id).unwrap();
                }
            }
        }
    }
    workspace
}

fn layout(workspace: &Workspace) -> Vec<Vec<(String, String, ItemSize)>> {
    BucketId::all()
        .map(|bucket| {
            workspace
                .items_in(bucket)
                .map(|item| (item.display_name().to_string(), item.label(), item.size()))
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn export_import_export_is_stable(steps in prop::collection::vec(step_strategy(), 0..80)) {
        let original = build(steps);
        let snapshot = export(&original);

        let json = snapshot.to_json_pretty().unwrap();
        let parsed = Snapshot::from_json(&json).unwrap();
        let mut restored = Workspace::new();
        import(&mut restored, &parsed);

        prop_assert!(restored.check_invariants().is_ok());
        prop_assert_eq!(export(&restored), snapshot);
        prop_assert_eq!(layout(&restored), layout(&original));
    }
}
