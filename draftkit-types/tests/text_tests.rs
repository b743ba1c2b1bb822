use draftkit_types::LocalizedText;

#[test]
fn new_map_is_empty() {
    let text = LocalizedText::new();
    assert!(text.is_empty());
    assert_eq!(text.len(), 0);
}

#[test]
fn set_and_get() {
    let mut text = LocalizedText::new();
    text.set("en", "Area");
    text.set("de", "Fläche");
    assert_eq!(text.get("en"), Some("Area"));
    assert_eq!(text.get("de"), Some("Fläche"));
    assert_eq!(text.get("fr"), None);
}

#[test]
fn set_replaces_existing() {
    let mut text = LocalizedText::new().with("en", "Old");
    text.set("en", "New");
    assert_eq!(text.get("en"), Some("New"));
    assert_eq!(text.len(), 1);
}

#[test]
fn remove_returns_previous() {
    let mut text = LocalizedText::new().with("en", "Area");
    assert_eq!(text.remove("en"), Some("Area".to_string()));
    assert_eq!(text.remove("en"), None);
    assert!(text.is_empty());
}

#[test]
fn blank_detects_whitespace_only() {
    let text = LocalizedText::new().with("en", "  ").with("de", "");
    assert!(text.is_blank());
    assert!(!text.is_empty());

    let text = text.with("fr", "Surface");
    assert!(!text.is_blank());
}

#[test]
fn iteration_is_locale_ordered() {
    let text = LocalizedText::new()
        .with("ru", "Площадь")
        .with("en", "Area")
        .with("de", "Fläche");
    let locales: Vec<_> = text.locales().collect();
    assert_eq!(locales, vec!["de", "en", "ru"]);
}

#[test]
fn from_iterator() {
    let text: LocalizedText = [("en", "Area"), ("de", "Fläche")].into_iter().collect();
    assert_eq!(text.len(), 2);
    assert_eq!(text.get("en"), Some("Area"));
}

#[test]
fn serializes_as_plain_object() {
    let text = LocalizedText::new().with("en", "Area").with("de", "Fläche");
    let json = serde_json::to_string(&text).unwrap();
    assert_eq!(json, r#"{"de":"Fläche","en":"Area"}"#);

    let back: LocalizedText = serde_json::from_str(&json).unwrap();
    assert_eq!(back, text);
}
