//! Aggregation behaviour over representative row sets.

use super::*;
use rstest::rstest;

fn row(id: i64, email: Option<&str>, name: Option<&str>, department: Option<&str>) -> RegistrationRow {
    RegistrationRow {
        id,
        email: email.map(str::to_owned),
        full_name: name.map(str::to_owned),
        department: department.map(str::to_owned),
        ..RegistrationRow::default()
    }
}

#[test]
fn counts_and_points_per_group() {
    let rows = vec![
        row(1, Some("ann@x"), Some("Ann"), Some("CSE")),
        row(2, Some("ANN@x"), None, None),
        row(3, Some("bob@x"), Some("Bob"), None),
    ];
    let entries = aggregate(&rows);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Ann");
    assert_eq!(entries[0].points, 20);
    assert_eq!(entries[0].registrations, 2);
    assert_eq!(entries[1].name, "Bob");
    assert_eq!(entries[1].points, 10);
}

#[test]
fn email_is_trimmed_and_lowercased_for_grouping() {
    let rows = vec![
        row(1, Some("  Ann@X  "), None, None),
        row(2, Some("ann@x"), None, None),
    ];
    let entries = aggregate(&rows);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "ann@x");
    assert_eq!(entries[0].registrations, 2);
}

#[test]
fn rows_without_email_never_merge() {
    let rows = vec![
        row(7, None, Some("Anonymous"), None),
        row(8, Some(""), None, None),
        row(9, Some("   "), None, None),
    ];
    let entries = aggregate(&rows);
    assert_eq!(entries.len(), 3);
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert!(keys.contains(&"row:7"));
    assert!(keys.contains(&"row:8"));
    assert!(keys.contains(&"row:9"));
}

#[test]
fn first_non_empty_profile_field_wins() {
    let rows = vec![
        row(1, Some("ann@x"), None, None),
        row(2, Some("ann@x"), Some("Ann Field"), Some("CSE")),
        row(3, Some("ann@x"), Some("Different"), Some("ECE")),
    ];
    let entries = aggregate(&rows);
    assert_eq!(entries[0].name, "Ann Field");
    assert_eq!(entries[0].department, "CSE");
}

#[test]
fn defaults_apply_when_nothing_usable() {
    let rows = vec![row(5, None, None, None)];
    let entries = aggregate(&rows);
    assert_eq!(entries[0].name, defaults::DEFAULT_DISPLAY_NAME);
    assert_eq!(entries[0].department, defaults::DEFAULT_DEPARTMENT);
}

#[test]
fn name_falls_back_to_email() {
    let rows = vec![row(1, Some("ann@x"), None, None)];
    let entries = aggregate(&rows);
    assert_eq!(entries[0].name, "ann@x");
}

#[test]
fn empty_input_yields_empty_standings() {
    assert!(aggregate(&[]).is_empty());
}

#[rstest]
#[case(vec![0, 1, 2, 3])]
#[case(vec![3, 2, 1, 0])]
#[case(vec![2, 0, 3, 1])]
fn output_is_invariant_under_input_permutation(#[case] order: Vec<usize>) {
    let base = vec![
        row(1, Some("ann@x"), Some("Ann"), Some("CSE")),
        row(2, Some("bob@x"), Some("Bob"), Some("ECE")),
        row(3, Some("ann@x"), None, None),
        row(4, Some("cat@x"), Some("Cat"), None),
    ];
    let reference = aggregate(&base);
    let permuted: Vec<RegistrationRow> = order.into_iter().map(|i| base[i].clone()).collect();
    let entries = aggregate(&permuted);
    assert_eq!(
        entries.iter().map(|e| (&e.key, e.points)).collect::<Vec<_>>(),
        reference
            .iter()
            .map(|e| (&e.key, e.points))
            .collect::<Vec<_>>()
    );
}

#[test]
fn ties_break_by_ascending_key() {
    let rows = vec![
        row(1, Some("zed@x"), None, None),
        row(2, Some("amy@x"), None, None),
    ];
    let entries = aggregate(&rows);
    assert_eq!(entries[0].key, "amy@x");
    assert_eq!(entries[1].key, "zed@x");
}
