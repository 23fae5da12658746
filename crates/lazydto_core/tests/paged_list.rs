use lazydto_core::{PagedList, PagingError, SyncedList};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Row {
    v: i64,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<Owner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Owner {
    name: String,
}

fn row(v: i64, label: &str) -> Row {
    Row {
        v,
        label: label.to_string(),
        owner: None,
    }
}

fn owned_row(v: i64, owner: &str) -> Row {
    Row {
        v,
        label: String::new(),
        owner: Some(Owner {
            name: owner.to_string(),
        }),
    }
}

fn values(rows: &[Row]) -> Vec<i64> {
    rows.iter().map(|row| row.v).collect()
}

#[test]
fn twenty_five_items_in_pages_of_ten() {
    let mut paged = PagedList::new((0..25).collect::<Vec<u32>>(), 0, 10).unwrap();
    assert_eq!(paged.total_count(), 25);
    assert_eq!(paged.total_pages(), 3);

    let first = paged.paged_items(None, None).unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0], 0);
    assert!(paged.has_next_page());
    assert!(!paged.has_previous_page());

    let last = paged.paged_items(Some(2), None).unwrap().to_vec();
    assert_eq!(last, vec![20, 21, 22, 23, 24]);
    assert!(!paged.has_next_page());
    assert!(paged.has_previous_page());

    assert!(paged.paged_items(Some(3), None).unwrap().is_empty());
    assert_eq!(paged.page_index(), 3);
}

#[test]
fn page_size_override_is_stored() {
    let mut paged = PagedList::new((0..25).collect::<Vec<u32>>(), 0, 10).unwrap();

    let page = paged.paged_items(Some(1), Some(20)).unwrap().to_vec();
    assert_eq!(page, vec![20, 21, 22, 23, 24]);
    assert_eq!(paged.page_size(), 20);
    assert_eq!(paged.total_pages(), 2);
}

#[test]
fn zero_page_size_is_rejected() {
    let err = PagedList::new(vec![1, 2, 3], 0, 0).unwrap_err();
    assert!(matches!(
        err,
        PagingError::InvalidArgument {
            name: "page_size",
            ..
        }
    ));

    let mut paged = PagedList::new(vec![1, 2, 3], 0, 2).unwrap();
    assert!(paged.paged_items(Some(1), Some(0)).is_err());
    assert_eq!(paged.page_size(), 2);
    assert_eq!(paged.page_index(), 0);
    assert!(paged.set_page_size(0).is_err());
}

#[test]
fn empty_source_has_no_pages() {
    let mut paged = PagedList::<u32>::new(Vec::new(), 0, 5).unwrap();
    assert_eq!(paged.total_pages(), 0);
    assert!(!paged.has_next_page());
    assert!(paged.paged_items(None, None).unwrap().is_empty());
}

#[test]
fn huge_page_index_is_empty_not_overflow() {
    let mut paged = PagedList::new(vec![1, 2, 3], 0, 2).unwrap();
    assert!(paged.paged_items(Some(usize::MAX), None).unwrap().is_empty());
}

#[test]
fn reorder_by_numeric_attribute() {
    let mut paged = PagedList::new(vec![row(3, "c"), row(1, "a"), row(2, "b")], 0, 10).unwrap();

    paged.reorder_items("v", false, None);
    assert_eq!(values(paged.items()), vec![1, 2, 3]);

    paged.reorder_items("v", true, None);
    assert_eq!(values(paged.items()), vec![3, 2, 1]);
    assert_eq!(paged.total_count(), 3);
}

#[test]
fn reorder_by_unknown_attribute_is_a_no_op() {
    let mut paged = PagedList::new(vec![row(3, "c"), row(1, "a"), row(2, "b")], 0, 10).unwrap();

    paged.reorder_items("missing", false, None);
    assert_eq!(values(paged.items()), vec![3, 1, 2]);

    paged.reorder_items("", false, None);
    paged.reorder_items("v..x", true, None);
    assert_eq!(values(paged.items()), vec![3, 1, 2]);
}

#[test]
fn reorder_is_stable_in_both_directions() {
    let rows = vec![row(1, "first"), row(0, "x"), row(1, "second"), row(1, "third")];
    let mut paged = PagedList::new(rows, 0, 10).unwrap();

    paged.reorder_items("v", false, None);
    let labels: Vec<&str> = paged.items().iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["x", "first", "second", "third"]);

    paged.reorder_items("v", true, None);
    let labels: Vec<&str> = paged.items().iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["first", "second", "third", "x"]);
}

#[test]
fn reorder_with_custom_comparer() {
    let mut paged = PagedList::new(vec![row(1, "bb"), row(2, "a"), row(3, "ccc")], 0, 10).unwrap();
    let by_length = |left: &serde_json::Value, right: &serde_json::Value| {
        let len = |value: &serde_json::Value| value.as_str().map(str::len).unwrap_or_default();
        len(left).cmp(&len(right))
    };

    paged.reorder_items("label", false, Some(&by_length));
    assert_eq!(values(paged.items()), vec![2, 1, 3]);

    paged.reorder_items("label", false, Some(&|_: &serde_json::Value, _: &serde_json::Value| {
        Ordering::Equal
    }));
    assert_eq!(values(paged.items()), vec![2, 1, 3]);
}

#[test]
fn reorder_by_nested_attribute_sorts_missing_first() {
    let rows = vec![owned_row(1, "zed"), row(2, "none"), owned_row(3, "amy")];
    let mut paged = PagedList::new(rows, 0, 10).unwrap();

    paged.reorder_items("owner.name", false, None);
    assert_eq!(values(paged.items()), vec![2, 3, 1]);
}

#[test]
fn reorder_does_not_touch_other_owners() {
    let original = vec![row(2, "b"), row(1, "a")];
    let mut paged = PagedList::new(original.clone(), 0, 10).unwrap();

    paged.reorder_items("v", false, None);
    assert_eq!(values(&original), vec![2, 1]);
    assert_eq!(values(paged.items()), vec![1, 2]);
}

#[test]
fn from_synced_list_materializes_source() {
    let mut list = SyncedList::<u32>::from_text("[5,6,7]");
    let mut paged = PagedList::from_list(&mut list, 1, 2).unwrap();

    assert_eq!(paged.paged_items(None, None).unwrap(), &[7]);
    assert_eq!(list.text().unwrap(), "[5,6,7]");

    let mut broken = SyncedList::<u32>::from_text("[5,");
    let err = PagedList::from_list(&mut broken, 0, 2).unwrap_err();
    assert!(matches!(err, PagingError::Source(_)));
}

#[test]
fn page_info_serializes_for_response_envelopes() {
    let paged = PagedList::new((0..25).collect::<Vec<u32>>(), 1, 10).unwrap();

    let info = serde_json::to_value(paged.page_info()).unwrap();
    assert_eq!(
        info,
        serde_json::json!({
            "page_index": 1,
            "page_size": 10,
            "total_count": 25,
            "total_pages": 3,
            "has_previous_page": true,
            "has_next_page": true
        })
    );
}
