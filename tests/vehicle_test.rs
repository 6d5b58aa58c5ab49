use autoparc::format::PriceFormat;
use autoparc::models::{brand, car_model, repair, trim, vehicle};
use autoparc::{api, auth, db, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use std::path::PathBuf;
use tower::util::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "------------------------autoparc-test";

async fn setup_test_app() -> (Router, DatabaseConnection, PathBuf) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let upload_dir = std::env::temp_dir().join(format!("autoparc-test-{}", uuid::Uuid::new_v4()));
    let app = api::api_router(AppState::new(
        db.clone(),
        PriceFormat::default(),
        upload_dir.clone(),
    ));
    (app, db, upload_dir)
}

fn admin_token() -> String {
    auth::create_jwt("test_admin", "admin").expect("Failed to create token")
}

// Catalog rows inserted directly; the vehicle endpoints are what these
// tests exercise
async fn seed_catalog(db: &DatabaseConnection) -> (i32, i32, i32) {
    let now = chrono::Utc::now().to_rfc3339();
    let brand = brand::ActiveModel {
        name: Set("Toyota".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert brand");

    let model = car_model::ActiveModel {
        name: Set("Corolla".to_string()),
        brand_id: Set(brand.id),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert model");

    let trim = trim::ActiveModel {
        name: Set("GR Sport".to_string()),
        model_id: Set(model.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert trim");

    (brand.id, model.id, trim.id)
}

async fn insert_vehicle(
    db: &DatabaseConnection,
    refs: (i32, i32, i32),
    purchase_date: &str,
    available_date: Option<&str>,
    sale_date: Option<&str>,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let v = vehicle::ActiveModel {
        year: Set(2020),
        brand_id: Set(refs.0),
        model_id: Set(refs.1),
        trim_id: Set(refs.2),
        purchase_date: Set(purchase_date.to_string()),
        purchase_price: Set(10000.0),
        available_date: Set(available_date.map(str::to_string)),
        sale_date: Set(sale_date.map(str::to_string)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    v.insert(db).await.expect("Failed to insert vehicle").id
}

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

fn multipart_body_with_file(fields: &[(&str, &str)], file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn vehicle_fields(refs: (i32, i32, i32)) -> Vec<(&'static str, String)> {
    vec![
        ("year", "2020".to_string()),
        ("brand_id", refs.0.to_string()),
        ("model_id", refs.1.to_string()),
        ("trim_id", refs.2.to_string()),
        ("purchase_date", "2024-01-15".to_string()),
        ("purchase_price", "10000.00".to_string()),
    ]
}

fn as_pairs<'a>(fields: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn test_create_vehicle_with_vin_round_trips() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;

    let mut fields = vehicle_fields(refs);
    fields.push(("vin", "1HGCM82633A004352".to_string()));

    let body = multipart_body(&as_pairs(&fields));
    let (status, body_json) = send(&app, multipart_request("POST", "/vehicles", body.into_bytes())).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body_json);
    assert_eq!(
        body_json["message"],
        "Vehicle Toyota Corolla (2020) added successfully"
    );
    let id = body_json["vehicle"]["id"].as_i64().unwrap();

    // Fetch returns the identical chassis id
    let (status, detail) = send(&app, json_request("GET", &format!("/vehicles/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["vehicle"]["vin"], "1HGCM82633A004352");
    assert_eq!(detail["vehicle"]["status"], "in_repair");

    // A second unit with the same chassis id is rejected
    let body = multipart_body(&as_pairs(&fields));
    let (status, dup) = send(&app, multipart_request("POST", "/vehicles", body.into_bytes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["errors"]["vin"], "A vehicle with this VIN already exists.");
}

#[tokio::test]
async fn test_vehicle_field_validation() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;

    let mut fields = vehicle_fields(refs);
    fields.push(("vin", "TOOSHORT".to_string()));
    fields[0] = ("year", "1985".to_string());
    fields[5] = ("purchase_price", "-5".to_string());

    let body = multipart_body(&as_pairs(&fields));
    let (status, errors) = send(&app, multipart_request("POST", "/vehicles", body.into_bytes())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        errors["errors"]["vin"],
        "VIN must be exactly 17 characters when provided"
    );
    assert_eq!(errors["errors"]["year"], "Year must be between 1990 and 2030");
    assert_eq!(
        errors["errors"]["purchase_price"],
        "Purchase price must be positive and at most 999999.99"
    );
    // Submitted values ride along for re-rendering
    assert_eq!(errors["values"]["year"], "1985");
}

#[tokio::test]
async fn test_mark_sold_requires_availability_first() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;
    let id = insert_vehicle(&db, refs, "2024-01-15", None, None).await;

    // Selling straight out of repair fails and changes nothing
    let (status, body) = send(
        &app,
        json_request("POST", &format!("/vehicles/{}/mark-sold", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "A vehicle must be available before it can be sold."
    );

    let row = vehicle::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(row.available_date.is_none());
    assert!(row.sale_date.is_none());

    // Available first, then sold
    let (status, _) = send(
        &app,
        json_request("POST", &format!("/vehicles/{}/mark-available", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/vehicles/{}/mark-sold", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The vehicle has been marked as sold.");

    let row = vehicle::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let available = row.available_date.expect("available date set");
    let sold = row.sale_date.expect("sale date set");
    assert!(sold >= available);
}

#[tokio::test]
async fn test_sale_price_is_purchase_plus_repairs_plus_markup() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;
    let id = insert_vehicle(&db, refs, "2024-01-15", None, None).await;

    for (desc, cost) in [("Brake pads", 300.0), ("Timing belt", 200.0)] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &format!("/vehicles/{}/repairs", id),
                Some(serde_json::json!({ "description": desc, "cost": cost })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, detail) = send(&app, json_request("GET", &format!("/vehicles/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    let v = &detail["vehicle"];
    assert_eq!(v["repairs_total"], 500.0);
    assert_eq!(v["sale_price"], 11000.0);
    assert_eq!(v["display_sale_price"], "11\u{202f}000,00 €");
    assert_eq!(v["repairs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_filters() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;

    // One unit per lifecycle stage, distinct purchase dates for ordering
    let in_repair = insert_vehicle(&db, refs, "2024-03-01", None, None).await;
    let available = insert_vehicle(&db, refs, "2024-02-01", Some("2024-02-10"), None).await;
    let sold = insert_vehicle(
        &db,
        refs,
        "2024-01-01",
        Some("2024-01-10"),
        Some("2024-01-20"),
    )
    .await;

    let list = |statut: &str| {
        let uri = if statut.is_empty() {
            "/vehicles".to_string()
        } else {
            format!("/vehicles?statut={}", statut)
        };
        let app = app.clone();
        async move {
            let (status, body) = send(&app, json_request("GET", &uri, None)).await;
            assert_eq!(status, StatusCode::OK);
            body["vehicles"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v["id"].as_i64().unwrap() as i32)
                .collect::<Vec<i32>>()
        }
    };

    // "toutes" returns everything, newest purchase first
    assert_eq!(list("toutes").await, vec![in_repair, available, sold]);

    // "vendues" is exactly the sold set
    assert_eq!(list("vendues").await, vec![sold]);

    // "reparation" means no availability date yet
    assert_eq!(list("reparation").await, vec![in_repair]);

    // The default bucket is "not yet sold", which still includes the unit
    // in repair (historical quirk)
    assert_eq!(list("").await, vec![in_repair, available]);
    assert_eq!(list("disponibles").await, vec![in_repair, available]);

    // Any other keyword falls back to the strict available-only filter
    assert_eq!(list("anything").await, vec![available]);
}

#[tokio::test]
async fn test_update_upserts_nested_repairs_without_deleting() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;
    let id = insert_vehicle(&db, refs, "2024-01-15", None, None).await;

    // First update inserts one repair through the nested path
    let mut fields = vehicle_fields(refs);
    fields.push((
        "repairs",
        r#"[{"id": null, "description": "Replace clutch", "cost": 450.0}]"#.to_string(),
    ));
    let body = multipart_body(&as_pairs(&fields));
    let (status, updated) = send(
        &app,
        multipart_request("PUT", &format!("/vehicles/{}", id), body.into_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {}", updated);
    let repairs = updated["vehicle"]["repairs"].as_array().unwrap();
    assert_eq!(repairs.len(), 1);
    let repair_id = repairs[0]["id"].as_i64().unwrap();

    // Second update edits the existing entry and adds a new one; blank
    // descriptions are skipped, nothing is deleted
    let nested = format!(
        r#"[{{"id": {}, "description": "Replace clutch and flywheel", "cost": 520.0}},
            {{"id": null, "description": "Wheel alignment", "cost": 80.0}},
            {{"id": null, "description": "   ", "cost": 0.0}}]"#,
        repair_id
    );
    let mut fields = vehicle_fields(refs);
    fields.push(("repairs", nested));
    let body = multipart_body(&as_pairs(&fields));
    let (status, updated) = send(
        &app,
        multipart_request("PUT", &format!("/vehicles/{}", id), body.into_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {}", updated);

    let rows = repair::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 2);
    let edited = rows.iter().find(|r| r.id == repair_id as i32).unwrap();
    assert_eq!(edited.description, "Replace clutch and flywheel");
    assert_eq!(edited.cost, 520.0);
}

#[tokio::test]
async fn test_photo_upload_stores_file_under_generated_name() {
    let (app, db, upload_dir) = setup_test_app().await;
    let refs = seed_catalog(&db).await;

    let fields = vehicle_fields(refs);
    let body = multipart_body_with_file(&as_pairs(&fields), "front.jpg", b"not-really-a-jpeg");
    let (status, created) = send(&app, multipart_request("POST", "/vehicles", body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);

    let photo_url = created["vehicle"]["photo_url"].as_str().unwrap();
    assert!(photo_url.starts_with("/uploads/vehicles/"));
    assert!(photo_url.ends_with(".jpg"));

    // The file landed where the uploads ServeDir points
    let file_name = photo_url.rsplit('/').next().unwrap();
    let stored = upload_dir.join("vehicles").join(file_name);
    assert_eq!(std::fs::read(&stored).unwrap(), b"not-really-a-jpeg");

    let _ = std::fs::remove_dir_all(&upload_dir);
}

#[tokio::test]
async fn test_delete_vehicle_cascades_repairs() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;
    let id = insert_vehicle(&db, refs, "2024-01-15", None, None).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/vehicles/{}/repairs", id),
            Some(serde_json::json!({ "description": "Paint touch-up", "cost": 120.0 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, json_request("DELETE", &format!("/vehicles/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vehicle deleted successfully");

    assert!(vehicle::Entity::find_by_id(id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    assert_eq!(repair::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_repair_validation_and_lifecycle() {
    let (app, db, _) = setup_test_app().await;
    let refs = seed_catalog(&db).await;
    let id = insert_vehicle(&db, refs, "2024-01-15", None, None).await;

    // Empty description and non-positive cost are both field errors
    let (status, errors) = send(
        &app,
        json_request(
            "POST",
            &format!("/vehicles/{}/repairs", id),
            Some(serde_json::json!({ "description": "  ", "cost": 0.0 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["errors"]["description"], "Description is required");
    assert_eq!(
        errors["errors"]["cost"],
        "Cost must be positive and at most 99999.99"
    );

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            &format!("/vehicles/{}/repairs", id),
            Some(serde_json::json!({ "description": "New tyres", "cost": 340.556 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let repair_id = created["repair"]["id"].as_i64().unwrap();
    // Costs are rounded to cents on the way in
    assert_eq!(created["repair"]["cost"], 340.56);

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/repairs/{}", repair_id),
            Some(serde_json::json!({ "description": "New tyres (front)", "cost": 170.0 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["repair"]["description"], "New tyres (front)");

    let (status, _) = send(
        &app,
        json_request("DELETE", &format!("/repairs/{}", repair_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request("DELETE", &format!("/repairs/{}", repair_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicle_not_found() {
    let (app, _db, _) = setup_test_app().await;

    let (status, _) = send(&app, json_request("GET", "/vehicles/999", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request("POST", "/vehicles/999/mark-available", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
