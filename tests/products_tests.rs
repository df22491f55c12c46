//! `/products` behaviour, driven through the router over an in-memory store.

mod support;

use serde_json::{Value, json};
use support::{app, create_category, create_product, send};

fn product_ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|row| row["product_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn pages_are_windows_in_id_order() {
    let (_, app) = app();
    let cat = create_category(&app, "Tools").await;
    let p1 = create_product(&app, "Hammer", cat).await;
    let p2 = create_product(&app, "Saw", cat).await;
    let p3 = create_product(&app, "Drill", cat).await;

    let (status, first) = send(&app, "GET", "/products?page=1&size=2", None).await;
    assert_eq!(status, 200);
    assert_eq!(product_ids(&first), vec![p1, p2]);

    let (_, second) = send(&app, "GET", "/products?page=2&size=2", None).await;
    assert_eq!(product_ids(&second), vec![p3]);

    let (_, third) = send(&app, "GET", "/products?page=3&size=2", None).await;
    assert_eq!(third, json!([]));
}

#[tokio::test]
async fn listing_rows_carry_the_joined_category() {
    let (_, app) = app();
    let cat = create_category(&app, "Lighting").await;
    let id = create_product(&app, "Lamp", cat).await;

    let (_, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(
        body,
        json!([{
            "product_id": id,
            "product_name": "Lamp",
            "category_id": cat,
            "category_name": "Lighting"
        }])
    );
}

#[tokio::test]
async fn listing_excludes_products_without_a_matching_category() {
    let (store, app) = app();
    let cat = create_category(&app, "Paint").await;
    let kept = create_product(&app, "Brush", cat).await;

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Loose", "category_id": null })),
    )
    .await;
    assert_eq!(status, 200);
    store.insert_orphan_product("Orphan", 9_999);

    let (_, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(product_ids(&body), vec![kept]);
}

#[tokio::test]
async fn invalid_pagination_falls_back_to_defaults() {
    let (_, app) = app();
    let cat = create_category(&app, "Bulk").await;
    let mut ids = Vec::new();
    for n in 0..12 {
        ids.push(create_product(&app, &format!("Item {n}"), cat).await);
    }

    let (status, body) = send(&app, "GET", "/products?page=abc&size=0", None).await;
    assert_eq!(status, 200);
    assert_eq!(product_ids(&body), ids[..10].to_vec());

    let (_, body) = send(&app, "GET", "/products?page=-1&size=nope", None).await;
    assert_eq!(product_ids(&body), ids[..10].to_vec());

    let (_, body) = send(&app, "GET", "/products?page=2", None).await;
    assert_eq!(product_ids(&body), ids[10..].to_vec());
}

#[tokio::test]
async fn create_with_unknown_category_is_an_error() {
    let (_, app) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Widget", "category_id": 77 })),
    )
    .await;
    assert_eq!(status, 409);
    assert!(body.get("id").is_none());
    assert!(body["error"].as_str().unwrap().contains("foreign key"));
}

#[tokio::test]
async fn update_uses_product_name_field() {
    let (_, app) = app();
    let old = create_category(&app, "Old").await;
    let new = create_category(&app, "New").await;
    let id = create_product(&app, "Chair", old).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "product_name": "Armchair", "category_id": new })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "id": id, "name": "Armchair", "category_id": new }));
}

#[tokio::test]
async fn update_accepts_name_alias() {
    let (_, app) = app();
    let cat = create_category(&app, "Desk").await;
    let id = create_product(&app, "Pen", cat).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "name": "Pencil", "category_id": cat })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Pencil");
}

#[tokio::test]
async fn update_with_both_names_prefers_product_name() {
    let (_, app) = app();
    let cat = create_category(&app, "Desk").await;
    let id = create_product(&app, "Pen", cat).await;

    // Clients echo the listed row back with the new name alongside.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "id": id, "name": "P", "product_name": "Q", "category_id": cat })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "id": id, "name": "Q", "category_id": cat }));
}

#[tokio::test]
async fn string_category_id_is_rejected() {
    let (_, app) = app();
    let cat = create_category(&app, "Desk").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Pen", "category_id": cat.to_string() })),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    let (_, listed) = send(&app, "GET", "/products", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn update_of_missing_product_is_null() {
    let (_, app) = app();

    let (status, body) = send(
        &app,
        "PUT",
        "/products/5",
        Some(json!({ "product_name": "Nothing", "category_id": null })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn delete_always_reports_success() {
    let (_, app) = app();
    let cat = create_category(&app, "Misc").await;
    let id = create_product(&app, "Thing", cat).await;

    for uri in [format!("/products/{id}"), format!("/products/{id}")] {
        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "message": "Product deleted successfully" }));
    }

    // Once the product is gone its category can be deleted.
    let (status, _) = send(&app, "DELETE", &format!("/categories/{cat}"), None).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (_, app) = app();

    let req = http::Request::builder()
        .method("POST")
        .uri("/products")
        .body(bytes::Bytes::from_static(b"{\"name\": "))
        .unwrap();
    let res = app.dispatch(req).await;
    assert_eq!(res.status_code(), 400);
}
