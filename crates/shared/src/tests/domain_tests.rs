use super::*;

#[test]
fn dimensions_render_as_height_width_length() {
    let dimensions = Dimensions {
        height: 10.0,
        width: 20.0,
        length: 30.5,
    };
    assert_eq!(dimensions.to_string(), "10x20x30.5");
}

#[test]
fn dimensions_parse_tolerates_spacing_and_upper_case_separator() {
    let parsed: Dimensions = " 24 X 45x15 ".parse().expect("dimensions");
    assert_eq!(
        parsed,
        Dimensions {
            height: 24.0,
            width: 45.0,
            length: 15.0,
        }
    );
}

#[test]
fn dimensions_parse_rejects_wrong_shape_and_garbage() {
    assert!(matches!(
        "10x20".parse::<Dimensions>(),
        Err(DimensionsParseError::Shape(_))
    ));
    assert!(matches!(
        "10xtallx30".parse::<Dimensions>(),
        Err(DimensionsParseError::NotANumber { part, .. }) if part == "tall"
    ));
}

#[test]
fn describe_uses_the_field_of_each_variant() {
    assert_eq!(ProductKind::Disc { size: 700.0 }.describe(), "Size: 700 MB");
    assert_eq!(ProductKind::Book { weight: 2.0 }.describe(), "Weight: 2 KG");
    assert_eq!(
        ProductKind::Furniture {
            dimensions: Dimensions {
                height: 24.0,
                width: 45.0,
                length: 15.0,
            },
        }
        .describe(),
        "Dimensions: 24x45x15"
    );
}

#[test]
fn product_type_labels_and_wire_names() {
    let labels: Vec<&str> = ProductType::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["DVD", "Book", "Furniture"]);
    assert_eq!(ProductType::Disc.to_string(), "disc");
    let parsed: ProductType = serde_json::from_str("\"DVD\"").expect("alias");
    assert_eq!(parsed, ProductType::Disc);
}

#[test]
fn price_label_has_two_decimals() {
    let product = Product {
        id: ProductId(1),
        sku: "JVC200123".into(),
        name: "Acme DISC".into(),
        price: 1.5,
        kind: ProductKind::Disc { size: 700.0 },
    };
    assert_eq!(product.price_label(), "1.50 $");
}
