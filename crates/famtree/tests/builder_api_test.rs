//! Integration tests for the FamilyTreeBuilder API
//!
//! These tests drive the public API end to end on small, realistic families.

use float_cmp::assert_approx_eq;

use famtree::{
    FamilySnapshot, FamilyTreeBuilder,
    cells::{CellId, CellKind},
    config::{AppConfig, LayoutConfig, StyleConfig},
    diagnostics::RelationIssue,
    identifier::PersonId,
    model::{Person, Relation},
};

fn id(value: &str) -> PersonId {
    PersonId::new(value)
}

fn builder() -> FamilyTreeBuilder {
    let layout = LayoutConfig::default()
        .with_card_size(100.0, 40.0)
        .with_couple_gap(10.0)
        .with_sibling_gap(20.0)
        .with_block_gap(60.0)
        .with_row_height(90.0)
        .with_margin(10.0);
    FamilyTreeBuilder::new(AppConfig::new(layout, StyleConfig::default()))
}

#[test]
fn test_builder_api_exists() {
    let _builder = FamilyTreeBuilder::default();
}

#[test]
fn test_alice_bob_carla() {
    let snapshot = FamilySnapshot::new(
        vec![
            Person::named("A", "Alice"),
            Person::named("B", "Bob"),
            Person::named("C", "Carla"),
        ],
        vec![
            Relation::spouse("A", "B"),
            Relation::spouse("B", "A"),
            Relation::parent("A", "C"),
        ],
    );

    let forest = builder().build(&snapshot);
    let couple = CellId::couple(id("A"), id("B"));
    let carla = CellId::Single(id("C"));

    assert_eq!(forest.len(), 2);
    assert_eq!(couple.to_string(), "couple:A-B");
    assert_eq!(forest.roots(), &[couple]);

    let couple_cell = forest.get(couple).unwrap();
    assert_eq!(couple_cell.kind(), CellKind::Couple);
    assert_eq!(couple_cell.members(), &[id("A"), id("B")]);
    assert_eq!((couple_cell.generation(), couple_cell.rank()), (0, 0));

    let carla_cell = forest.get(carla).unwrap();
    assert_eq!(carla.to_string(), "person:C");
    assert_eq!(carla_cell.parent_cell(), Some(couple));
    assert_eq!((carla_cell.generation(), carla_cell.rank()), (1, 0));
}

#[test]
fn test_couple_id_uses_ids_not_names() {
    // "Zed" sorts after "Amy" by name, but the id "a" sorts before "z".
    let snapshot = FamilySnapshot::new(
        vec![Person::named("z", "Amy"), Person::named("a", "Zed")],
        vec![Relation::spouse("z", "a")],
    );

    let forest = builder().build(&snapshot);
    let cell = forest.cells().next().unwrap();

    assert_eq!(cell.id().to_string(), "couple:a-z");
    assert_eq!(cell.members(), &[id("a"), id("z")]);
}

#[test]
fn test_spouse_triangle_forms_one_couple() {
    // a, b and c are all declared spouses of each other.
    let snapshot = FamilySnapshot::new(
        vec![
            Person::named("a", "Anna"),
            Person::named("b", "Bruno"),
            Person::named("c", "Céline"),
        ],
        vec![
            Relation::spouse("a", "b"),
            Relation::spouse("a", "c"),
            Relation::spouse("b", "c"),
        ],
    );

    let forest = builder().build(&snapshot);

    let couples: Vec<_> = forest
        .cells()
        .filter(|cell| cell.kind() == CellKind::Couple)
        .collect();
    assert_eq!(couples.len(), 1);
    assert_eq!(couples[0].id(), CellId::couple(id("a"), id("b")));
    assert_eq!(forest.cell_of(id("c")), Some(CellId::Single(id("c"))));

    for person in ["a", "b", "c"] {
        let holders = forest
            .cells()
            .filter(|cell| cell.members().contains(&id(person)))
            .count();
        assert_eq!(holders, 1);
    }
}

#[test]
fn test_three_generation_chain() {
    let snapshot = FamilySnapshot::new(
        vec![
            Person::named("g", "Gisèle"),
            Person::named("p", "Pierre"),
            Person::named("c", "Camille"),
        ],
        vec![Relation::parent("g", "p"), Relation::child("c", "p")],
    );

    let builder = builder();
    let forest = builder.build(&snapshot);
    let layout = builder.layout(&forest);

    let geometry = |person: &str| *layout.get(CellId::Single(id(person))).unwrap();
    let (g, p, c) = (geometry("g"), geometry("p"), geometry("c"));

    assert_approx_eq!(f32, g.top_y(), 10.0);
    assert_approx_eq!(f32, p.top_y() - g.top_y(), 90.0);
    assert_approx_eq!(f32, c.top_y() - p.top_y(), 90.0);
    assert_approx_eq!(f32, g.center_x(), p.center_x());
    assert_approx_eq!(f32, p.center_x(), c.center_x());
}

#[test]
fn test_disjoint_families_do_not_overlap() {
    let snapshot = FamilySnapshot::new(
        vec![
            Person::named("a1", "Ada"),
            Person::named("a2", "Alan"),
            Person::named("z1", "Zora"),
            Person::named("z2", "Zeno"),
            Person::named("z3", "Zia"),
        ],
        vec![
            Relation::parent("a1", "a2"),
            Relation::parent("z1", "z2"),
            Relation::parent("z1", "z3"),
        ],
    );

    let builder = builder();
    let forest = builder.build(&snapshot);
    let layout = builder.layout(&forest);

    let roots = forest.roots();
    assert_eq!(roots, &[CellId::Single(id("a1")), CellId::Single(id("z1"))]);

    let left = layout.get(roots[0]).unwrap().subtree();
    let right = layout.get(roots[1]).unwrap().subtree();
    assert!(!left.overlaps(right));
    assert_approx_eq!(f32, right.min() - left.max(), 60.0);
}

#[test]
fn test_relayout_with_other_config_leaves_forest_untouched() {
    let snapshot = FamilySnapshot::new(
        vec![Person::named("p", "Pat"), Person::named("k", "Kim")],
        vec![Relation::parent("p", "k")],
    );

    let small = builder();
    let large = FamilyTreeBuilder::default();

    let forest = small.build(&snapshot);
    let before = forest.cells().cloned().collect::<Vec<_>>();

    let first = small.layout(&forest);
    let _other = large.layout(&forest);
    let second = small.layout(&forest);

    assert_eq!(first, second);
    assert_eq!(forest.cells().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn test_render_svg_and_json() {
    let snapshot = FamilySnapshot::new(
        vec![Person::named("a", "Ann"), Person::named("b", "Ben")],
        vec![Relation::spouse("a", "b")],
    )
    .with_active_user("b");

    let builder = FamilyTreeBuilder::default();

    let svg = builder.render_svg(&snapshot).expect("Failed to render SVG");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("class=\"active\""));

    let json = builder.render_json(&snapshot).expect("Failed to render JSON");
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["cells"][0]["id"], "couple:a-b");
    assert_eq!(document["active_user"], "b");
}

#[test]
fn test_invalid_style_is_export_error() {
    let style: StyleConfig = toml::from_str("card_fill = \"definitely-not-a-color\"").unwrap();
    let builder = FamilyTreeBuilder::new(AppConfig::new(LayoutConfig::default(), style));
    let snapshot = FamilySnapshot::new(vec![Person::named("a", "Ann")], Vec::new());

    assert!(matches!(
        builder.render_svg(&snapshot),
        Err(famtree::FamTreeError::Export(_))
    ));
}

#[test]
fn test_try_new_rejects_unusable_layout() {
    for layout in [
        LayoutConfig::default().with_sibling_gap(f32::NAN),
        LayoutConfig::default().with_sibling_gap(-5.0),
        LayoutConfig::default().with_card_size(-100.0, 40.0),
    ] {
        let result = FamilyTreeBuilder::try_new(AppConfig::new(layout, StyleConfig::default()));
        assert!(matches!(result, Err(famtree::FamTreeError::Config(_))));
    }

    let builder = FamilyTreeBuilder::try_new(AppConfig::default()).expect("defaults are valid");
    let snapshot = FamilySnapshot::new(vec![Person::named("a", "Ann")], Vec::new());
    assert!(builder.render_svg(&snapshot).is_ok());
}

#[test]
fn test_inspect_explains_dropped_parent() {
    let snapshot = FamilySnapshot::new(
        vec![
            Person::named("mum", "Maria"),
            Person::named("dad", "David"),
            Person::named("kid", "Kim"),
        ],
        vec![Relation::parent("mum", "kid"), Relation::parent("dad", "kid")],
    );

    let issues = FamilyTreeBuilder::default().inspect(&snapshot);
    assert_eq!(
        issues,
        vec![RelationIssue::ExtraParent {
            child: id("kid"),
            kept: id("mum"),
            dropped: id("dad"),
        }]
    );
}

#[test]
fn test_snapshot_from_toml() {
    let snapshot = FamilySnapshot::from_toml(
        r#"
        active_user_id = "k"

        [[people]]
        id = "p"
        full_name = "Pat"

        [[people]]
        id = "k"

        [[relations]]
        user_id = "k"
        related_user_id = "p"
        relationship_type = "child"
        "#,
    )
    .expect("Failed to parse TOML snapshot");

    let forest = FamilyTreeBuilder::default().build(&snapshot);
    assert_eq!(forest.active_cell(), Some(CellId::Single(id("k"))));
    assert_eq!(forest.roots(), &[CellId::Single(id("p"))]);
}

#[test]
fn test_builder_reusability() {
    let builder = FamilyTreeBuilder::default();

    let first = FamilySnapshot::new(vec![Person::named("a", "Ann")], Vec::new());
    let second = FamilySnapshot::new(
        vec![Person::named("b", "Ben"), Person::named("c", "Cid")],
        vec![Relation::parent("b", "c")],
    );

    assert_eq!(builder.build(&first).len(), 1);
    assert_eq!(builder.build(&second).len(), 2);
    assert!(builder.render_svg(&first).is_ok());
    assert!(builder.render_svg(&second).is_ok());
}
