use catalog_core::Category;

#[test]
fn category_serialization_uses_expected_wire_fields() {
    let category = Category {
        id: 42,
        name: "Vitamins".to_string(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
    };

    let json = serde_json::to_value(&category).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["name"], "Vitamins");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["updated_at"], 1_700_000_360_000_i64);

    let decoded: Category = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, category);
}

#[test]
fn renamed_keeps_identity_and_timestamps() {
    let category = Category {
        id: 7,
        name: "Vitamin".to_string(),
        created_at: 10,
        updated_at: 20,
    };

    let renamed = category.renamed("Vitamins");
    assert_eq!(renamed.id, 7);
    assert_eq!(renamed.name, "Vitamins");
    assert_eq!(renamed.created_at, 10);
    assert_eq!(renamed.updated_at, 20);
}
