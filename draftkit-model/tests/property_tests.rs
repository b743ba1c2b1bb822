use draftkit_model::{Property, PropertyKind, PropertyOption};
use draftkit_types::{ChildRecord, DraftRecord, LocalizedText, RecordId, Validate};
use pretty_assertions::assert_eq;

fn living_area() -> Property {
    Property::new(RecordId::Serial(5), "LIVING_AREA", PropertyKind::Number)
        .with_name(LocalizedText::new().with("en", "Living area"))
        .with_unit("m²")
}

#[test]
fn valid_property_passes() {
    assert!(living_area().validate().is_ok());
}

#[test]
fn unit_on_non_numeric_kind_is_rejected() {
    let prop = Property::new(RecordId::Serial(5), "HEATING", PropertyKind::Select)
        .with_name(LocalizedText::new().with("en", "Heating"))
        .with_unit("m²");
    let err = prop.validate().unwrap_err();
    assert_eq!(err.field, "unit");
}

#[test]
fn select_kinds_carry_options() {
    assert!(PropertyKind::Select.has_options());
    assert!(PropertyKind::MultiSelect.has_options());
    assert!(!PropertyKind::Text.has_options());
    assert!(!PropertyKind::Number.has_options());
    assert!(!PropertyKind::Boolean.has_options());
}

#[test]
fn kind_serializes_snake_case() {
    let json = serde_json::to_string(&PropertyKind::MultiSelect).unwrap();
    assert_eq!(json, "\"multi_select\"");
}

#[test]
fn required_builder_sets_flag() {
    let prop = living_area().required();
    assert!(prop.required);
}

#[test]
fn property_wire_shape() {
    let json = serde_json::to_value(living_area()).unwrap();
    assert_eq!(json["id"], serde_json::json!(5));
    assert_eq!(json["kind"], serde_json::json!("number"));
    assert_eq!(json["unit"], serde_json::json!("m²"));
    assert!(json.get("is_new").is_none());
}

#[test]
fn property_deserializes_with_defaults() {
    let prop: Property = serde_json::from_str(
        r#"{"id": 5, "code": "LIVING_AREA", "kind": "number"}"#,
    )
    .unwrap();
    assert!(!prop.is_new);
    assert!(!prop.required);
    assert_eq!(prop.sort_order, 0);
    assert!(prop.unit.is_none());
}

// ── Options ──────────────────────────────────────────────────────

#[test]
fn option_parent_link() {
    let mut opt = PropertyOption::new(RecordId::Draft(-1), RecordId::Serial(5), "GAS")
        .with_label(LocalizedText::new().with("en", "Gas"));
    assert_eq!(opt.parent_id(), RecordId::Serial(5));

    opt.set_parent_id(RecordId::Serial(6));
    assert_eq!(opt.property_id, RecordId::Serial(6));
}

#[test]
fn option_requires_code_and_label() {
    let opt = PropertyOption::new(RecordId::Draft(-1), RecordId::Serial(5), "");
    assert_eq!(opt.validate().unwrap_err().field, "code");

    let opt = PropertyOption::new(RecordId::Draft(-1), RecordId::Serial(5), "GAS");
    assert_eq!(opt.validate().unwrap_err().field, "label");

    let opt = opt.with_label(LocalizedText::new().with("en", "Gas"));
    assert!(opt.validate().is_ok());
}

#[test]
fn option_sort_order_roundtrip() {
    let opt = PropertyOption::new(RecordId::Serial(9), RecordId::Serial(5), "GAS")
        .with_label(LocalizedText::new().with("en", "Gas"))
        .with_sort_order(2);
    let json = serde_json::to_string(&opt).unwrap();
    let back: PropertyOption = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opt);
}
