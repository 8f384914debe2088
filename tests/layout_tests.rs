//! Layout report and JSON dump.

use pixelflow_consts::{named_constants, F32x8, F64x2, LayoutReport, LogRow, Table, TrigRow, LAYOUT};
use test_log::test;

#[test]
fn cached_layout_should_match_fresh_collection() {
    assert_eq!(*LAYOUT, LayoutReport::collect());
    LAYOUT.verify().expect("shipped tables must verify");
}

#[test]
fn layout_json_should_report_rows_and_strides() {
    let value = serde_json::to_value(&*LAYOUT).expect("layout serializes");
    assert_eq!(value["register_bytes"], 16);

    let f32_layout = &value["elements"][0];
    assert_eq!(f32_layout["element"], "f32");
    assert_eq!(f32_layout["stride"], 4);
    assert_eq!(f32_layout["tables"][0]["table"], "trig");
    assert_eq!(f32_layout["tables"][0]["rows"], TrigRow::ROWS);

    let f64_layout = &value["elements"][1];
    assert_eq!(f64_layout["stride"], 2);
    assert_eq!(f64_layout["tables"][1]["table"], "log");
    assert_eq!(f64_layout["tables"][1]["len"], LogRow::ROWS * 2);
}

#[test]
fn every_table_should_be_reported_for_every_element() {
    for element in &LAYOUT.elements {
        let tables: Vec<Table> = element.tables.iter().map(|t| t.table).collect();
        assert_eq!(tables, Table::ALL.to_vec(), "{}", element.element);
    }
}

#[test]
fn named_constants_should_render_lane_per_entry() {
    for c in named_constants::<F32x8>() {
        assert_eq!(c.lanes.len(), 8, "{}", c.name);
        assert!(c.lanes.iter().all(|l| l.len() == 10), "{}: {:?}", c.name, c.lanes);
    }
    for c in named_constants::<F64x2>() {
        assert_eq!(c.lanes.len(), 2, "{}", c.name);
        assert!(c.lanes.iter().all(|l| l.len() == 18), "{}: {:?}", c.name, c.lanes);
    }
}

#[test]
fn named_constants_should_serialize() {
    let json = serde_json::to_string(&named_constants::<F64x2>()).expect("constants serialize");
    assert!(json.contains("\"name\":\"neg_inf\""));
    assert!(json.contains("0xfff0000000000000"));
}
