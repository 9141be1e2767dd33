use gedtree_core::{
    find_root, parse_gedcom, project_tree, FamilyTreeError, FamilyTreeService, ProjectionOptions,
    Relation, RootKind, SourceError, TreeNode, FALLBACK_ROOT_WARNING, MAX_DEPTH_LIMIT,
};
use std::fs;

const SMITH_FAMILY: &str = include_str!("fixtures/smith_family.ged");

const THREE_PERSON: &str = "\
0 @I1@ INDI
1 NAME John /Smith/
1 SEX M
1 FAMS @F1@
0 @I2@ INDI
1 NAME Jane /Doe/
1 SEX F
1 FAMS @F1@
0 @I3@ INDI
1 NAME Bob /Smith/
1 SEX M
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
";

/// Builds `generations` individuals where each one is the only child of the previous.
fn lineage(generations: usize) -> String {
    let mut text = String::new();
    for index in 1..=generations {
        text.push_str(&format!("0 @I{index}@ INDI\n1 NAME Person{index} /Line/\n"));
        if index > 1 {
            text.push_str(&format!("1 FAMC @F{}@\n", index - 1));
        }
        if index < generations {
            text.push_str(&format!("1 FAMS @F{index}@\n"));
        }
    }
    for index in 1..generations {
        text.push_str(&format!(
            "0 @F{index}@ FAM\n1 HUSB @I{index}@\n1 CHIL @I{}@\n",
            index + 1
        ));
    }
    text
}

fn child_ids(node: &TreeNode) -> Vec<&str> {
    node.children.iter().map(|child| child.id.as_str()).collect()
}

#[test]
fn three_person_tree_has_one_partner_and_one_child() {
    let data = parse_gedcom(THREE_PERSON);
    let root = find_root(&data).expect("root should exist");
    assert!(root.id == "@I1@" || root.id == "@I2@");
    assert_eq!(root.kind, RootKind::Ancestor);

    let tree = project_tree(&data, "@I1@", &ProjectionOptions::default()).unwrap();
    assert_eq!(tree.name, "John Smith");
    assert_eq!(tree.partners.len(), 1);
    assert_eq!(tree.partners[0].id, "@I2@");
    assert_eq!(tree.partners[0].relation, Relation::Spouse);
    assert_eq!(child_ids(&tree), vec!["@I3@"]);
    assert!(tree.children[0].children.is_empty());
}

#[test]
fn root_is_never_a_child() {
    let data = parse_gedcom("0 @I3@ INDI\n0 @I1@ INDI\n0 @I2@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 CHIL @I3@\n");
    let root = find_root(&data).unwrap();
    assert_ne!(root.id, "@I3@");
}

#[test]
fn dangling_child_is_omitted() {
    let data = parse_gedcom(SMITH_FAMILY);
    let tree = project_tree(&data, "@I3@", &ProjectionOptions::default()).unwrap();
    assert_eq!(child_ids(&tree), vec!["@I6@"]);
}

#[test]
fn max_depth_two_keeps_exactly_two_child_levels() {
    let data = parse_gedcom(&lineage(6));
    let tree = project_tree(&data, "@I1@", &ProjectionOptions::with_max_depth(2)).unwrap();

    assert_eq!(tree.depth(), 2);
    let grandchild = &tree.children[0].children[0];
    assert_eq!(grandchild.id, "@I3@");
    assert!(grandchild.children.is_empty());
}

#[test]
fn default_depth_is_five_generations_below_root() {
    let data = parse_gedcom(&lineage(10));
    let tree = project_tree(&data, "@I1@", &ProjectionOptions::default()).unwrap();
    assert_eq!(tree.depth(), 5);
    assert_eq!(tree.descendant_count(), 5);
}

#[test]
fn very_long_lineage_with_oversized_depth_is_clamped() {
    let data = parse_gedcom(&lineage(200_000));
    let service = FamilyTreeService::new(ProjectionOptions::with_max_depth(usize::MAX));
    let view = service.build_from_data_with_root(&data, "@I1@").unwrap();

    assert_eq!(view.tree.depth(), MAX_DEPTH_LIMIT);
    assert_eq!(view.tree.descendant_count(), MAX_DEPTH_LIMIT);
    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains(&format!("\"@I{}@\"", MAX_DEPTH_LIMIT + 1)));
    assert!(!json.contains(&format!("\"@I{}@\"", MAX_DEPTH_LIMIT + 2)));
}

#[test]
fn children_follow_family_order_then_source_order() {
    let data = parse_gedcom(
        "0 @I1@ INDI\n1 FAMS @F2@\n1 FAMS @F1@\n\
         0 @A@ INDI\n0 @B@ INDI\n0 @C@ INDI\n0 @W1@ INDI\n0 @W2@ INDI\n\
         0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @W1@\n1 CHIL @A@\n\
         0 @F2@ FAM\n1 HUSB @I1@\n1 WIFE @W2@\n1 CHIL @C@\n1 CHIL @B@\n",
    );
    let tree = project_tree(&data, "@I1@", &ProjectionOptions::default()).unwrap();
    let partner_ids: Vec<&str> = tree.partners.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(partner_ids, vec!["@W2@", "@W1@"]);
    assert_eq!(child_ids(&tree), vec!["@C@", "@B@", "@A@"]);
}

#[test]
fn partners_are_not_expanded() {
    let data = parse_gedcom(SMITH_FAMILY);
    let tree = project_tree(&data, "@I1@", &ProjectionOptions::default()).unwrap();
    let json = serde_json::to_value(&tree.partners[0]).unwrap();
    assert_eq!(json["relation"], "spouse");
    assert!(json.get("children").is_none());
    assert!(json.get("partners").is_none());
}

#[test]
fn tree_json_matches_rendering_shape() {
    let data = parse_gedcom(SMITH_FAMILY);
    let tree = project_tree(&data, "@I1@", &ProjectionOptions::default()).unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["id"], "@I1@");
    assert_eq!(json["givenName"], "John");
    assert_eq!(json["birthDate"], "ABT 1850");
    assert_eq!(json["deathDate"], "12 MAR 1921");
    assert_eq!(json["partners"][0]["name"], "Mary O'Brien");
    assert_eq!(json["children"][0]["name"], "Thomas Smith");
    assert_eq!(json["children"][0]["children"][0]["id"], "@I6@");
    assert_eq!(json["children"][1]["sex"], "F");
}

#[test]
fn service_builds_tree_from_text() {
    let service = FamilyTreeService::default();
    let view = service.build(SMITH_FAMILY).unwrap();

    assert_eq!(view.tree.id, "@I1@");
    assert_eq!(view.root_kind, RootKind::Ancestor);
    assert_eq!(view.warning, None);
    assert_eq!(view.stats.individuals, 6);
    assert_eq!(view.stats.families, 2);
    assert_eq!(view.stats.dangling_references, 1);
}

#[test]
fn service_reports_no_individuals_distinctly() {
    let service = FamilyTreeService::default();
    let err = service.build("0 HEAD\n0 TRLR\n").unwrap_err();
    assert!(matches!(err, FamilyTreeError::NoIndividualsFound));
    assert_eq!(err.code(), "NO_INDIVIDUALS_FOUND");
    assert!(err.suggestion().contains("valid individual records"));
}

#[test]
fn service_warns_when_root_is_a_fallback() {
    let service = FamilyTreeService::default();
    let view = service
        .build("0 @I1@ INDI\n1 FAMS @F1@\n0 @I2@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n1 CHIL @I2@\n1 CHIL @I1@\n")
        .unwrap();
    assert_eq!(view.root_kind, RootKind::Fallback);
    assert_eq!(view.tree.id, "@I1@");
    assert_eq!(view.warning.as_deref(), Some(FALLBACK_ROOT_WARNING));
}

#[test]
fn service_honours_requested_root_and_depth() {
    let service = FamilyTreeService::new(ProjectionOptions::with_max_depth(1));
    let view = service.build_with_root(&lineage(4), "@I2@").unwrap();
    assert_eq!(view.root_kind, RootKind::Requested);
    assert_eq!(view.tree.id, "@I2@");
    assert_eq!(view.tree.depth(), 1);

    let err = service.build_with_root(&lineage(4), "@I9@").unwrap_err();
    assert!(matches!(err, FamilyTreeError::RootNotFound(ref id) if id == "@I9@"));
    assert_eq!(err.code(), "ROOT_NOT_FOUND");
}

#[test]
fn service_loads_ged_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smith.ged");
    fs::write(&path, SMITH_FAMILY).unwrap();

    let service = FamilyTreeService::default();
    let view = service.build_from_file(&path, None).unwrap();
    assert_eq!(view.file_name.as_deref(), Some("smith.ged"));
    assert_eq!(view.tree.id, "@I1@");

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["fileName"], "smith.ged");
    assert_eq!(json["rootKind"], "ancestor");
    assert!(json.get("warning").is_none());
}

#[test]
fn service_rejects_non_gedcom_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smith.txt");
    fs::write(&path, SMITH_FAMILY).unwrap();

    let err = FamilyTreeService::default()
        .build_from_file(&path, None)
        .unwrap_err();
    assert!(matches!(
        err,
        FamilyTreeError::Source(SourceError::InvalidExtension(_))
    ));
    assert_eq!(err.code(), "INVALID_FILE_TYPE");
}
