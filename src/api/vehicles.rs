use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use sea_orm::*;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::auth::AdminClaims;
use crate::format::PriceFormat;
use crate::models::brand::{self, Entity as Brand};
use crate::models::car_model::{self, Entity as CarModel};
use crate::models::repair::{self, Entity as Repair, RepairDto};
use crate::models::trim::{self, Entity as Trim};
use crate::models::vehicle::{self, Entity as Vehicle};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListVehiclesQuery {
    pub statut: Option<String>,
}

/// Validated vehicle form fields, shared by create and update.
struct VehicleForm {
    vin: Option<String>,
    year: i32,
    brand_id: i32,
    model_id: i32,
    trim_id: i32,
    purchase_date: String,
    purchase_price: f64,
    available_date: Option<String>,
    sale_date: Option<String>,
    description: Option<String>,
}

fn parse_date(value: &str) -> Option<String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl VehicleForm {
    /// Field-by-field validation; every failure lands in the error map so
    /// the form can be re-rendered with all messages at once.
    fn parse(fields: &HashMap<String, String>) -> Result<Self, Map<String, Value>> {
        let mut errors = Map::new();

        let vin = match fields.get("vin").map(|v| v.trim()) {
            None | Some("") => None,
            Some(v) if v.chars().count() == 17 => Some(v.to_string()),
            Some(_) => {
                errors.insert(
                    "vin".to_string(),
                    json!("VIN must be exactly 17 characters when provided"),
                );
                None
            }
        };

        let year = match fields.get("year").and_then(|v| v.trim().parse::<i32>().ok()) {
            Some(y) if (1990..=2030).contains(&y) => y,
            Some(_) => {
                errors.insert("year".to_string(), json!("Year must be between 1990 and 2030"));
                0
            }
            None => {
                errors.insert("year".to_string(), json!("Year is required"));
                0
            }
        };

        let mut reference = |field: &str| match fields
            .get(field)
            .and_then(|v| v.trim().parse::<i32>().ok())
        {
            Some(id) if id > 0 => id,
            _ => {
                errors.insert(field.to_string(), json!("This field is required"));
                0
            }
        };
        let brand_id = reference("brand_id");
        let model_id = reference("model_id");
        let trim_id = reference("trim_id");

        let purchase_date = match fields.get("purchase_date").map(|v| v.trim()) {
            None | Some("") => {
                errors.insert("purchase_date".to_string(), json!("Purchase date is required"));
                String::new()
            }
            Some(v) => match parse_date(v) {
                Some(d) => d,
                None => {
                    errors.insert(
                        "purchase_date".to_string(),
                        json!("Purchase date must be a valid YYYY-MM-DD date"),
                    );
                    String::new()
                }
            },
        };

        let purchase_price = match fields
            .get("purchase_price")
            .and_then(|v| v.trim().replace(',', ".").parse::<f64>().ok())
        {
            Some(p) if p > 0.0 && p <= 999_999.99 => round_cents(p),
            Some(_) => {
                errors.insert(
                    "purchase_price".to_string(),
                    json!("Purchase price must be positive and at most 999999.99"),
                );
                0.0
            }
            None => {
                errors.insert("purchase_price".to_string(), json!("Purchase price is required"));
                0.0
            }
        };

        let mut optional_date = |field: &str| match fields.get(field).map(|v| v.trim()) {
            None | Some("") => None,
            Some(v) => match parse_date(v) {
                Some(d) => Some(d),
                None => {
                    errors.insert(
                        field.to_string(),
                        json!("Must be a valid YYYY-MM-DD date"),
                    );
                    None
                }
            },
        };
        let available_date = optional_date("available_date");
        let sale_date = optional_date("sale_date");

        let description = fields
            .get("description")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            vin,
            year,
            brand_id,
            model_id,
            trim_id,
            purchase_date,
            purchase_price,
            available_date,
            sale_date,
            description,
        })
    }
}

/// Drain a multipart form into text fields plus an optional photo part.
async fn read_form(
    multipart: &mut Multipart,
) -> Result<(HashMap<String, String>, Option<(String, Vec<u8>)>), Response> {
    let mut fields = HashMap::new();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response()
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            })?;
            if !data.is_empty() {
                photo = Some((file_name, data.to_vec()));
            }
        } else {
            let value = field.text().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            })?;
            fields.insert(name, value);
        }
    }

    Ok((fields, photo))
}

/// Write the uploaded photo under a generated name and return its public path.
fn store_photo(
    upload_dir: &std::path::Path,
    original_name: &str,
    data: &[u8],
) -> Result<String, String> {
    let ext = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    let dir = upload_dir.join("vehicles");
    std::fs::create_dir_all(&dir).map_err(|e| format!("Failed to create upload dir: {}", e))?;

    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), ext);
    std::fs::write(dir.join(&file_name), data).map_err(|e| format!("Failed to save photo: {}", e))?;

    Ok(format!("/uploads/vehicles/{}", file_name))
}

async fn vin_taken(
    db: &DatabaseConnection,
    vin: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = Vehicle::find().filter(vehicle::Column::Vin.eq(vin));
    if let Some(id) = exclude_id {
        query = query.filter(vehicle::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

struct CatalogNames {
    brands: HashMap<i32, String>,
    models: HashMap<i32, String>,
    trims: HashMap<i32, String>,
}

impl CatalogNames {
    fn get(&self, v: &vehicle::Model) -> (String, String, String) {
        let name = |map: &HashMap<i32, String>, id: i32| {
            map.get(&id).cloned().unwrap_or_else(|| "Unknown".to_string())
        };
        (
            name(&self.brands, v.brand_id),
            name(&self.models, v.model_id),
            name(&self.trims, v.trim_id),
        )
    }
}

async fn catalog_names(
    db: &DatabaseConnection,
    vehicles: &[vehicle::Model],
) -> Result<CatalogNames, DbErr> {
    let brand_ids: Vec<i32> = vehicles.iter().map(|v| v.brand_id).collect();
    let model_ids: Vec<i32> = vehicles.iter().map(|v| v.model_id).collect();
    let trim_ids: Vec<i32> = vehicles.iter().map(|v| v.trim_id).collect();

    let mut names = CatalogNames {
        brands: HashMap::new(),
        models: HashMap::new(),
        trims: HashMap::new(),
    };

    if vehicles.is_empty() {
        return Ok(names);
    }

    for b in Brand::find()
        .filter(brand::Column::Id.is_in(brand_ids))
        .all(db)
        .await?
    {
        names.brands.insert(b.id, b.name);
    }
    for m in CarModel::find()
        .filter(car_model::Column::Id.is_in(model_ids))
        .all(db)
        .await?
    {
        names.models.insert(m.id, m.name);
    }
    for t in Trim::find()
        .filter(trim::Column::Id.is_in(trim_ids))
        .all(db)
        .await?
    {
        names.trims.insert(t.id, t.name);
    }

    Ok(names)
}

fn vehicle_row(
    v: &vehicle::Model,
    names: &CatalogNames,
    repairs_total: f64,
    prices: &PriceFormat,
) -> Value {
    let (brand_name, model_name, trim_name) = names.get(v);
    let sale_price = v.sale_price(repairs_total);

    json!({
        "id": v.id,
        "vin": v.vin,
        "year": v.year,
        "brand_id": v.brand_id,
        "brand_name": brand_name,
        "model_id": v.model_id,
        "model_name": model_name,
        "trim_id": v.trim_id,
        "trim_name": trim_name,
        "purchase_date": v.purchase_date,
        "purchase_price": v.purchase_price,
        "available_date": v.available_date,
        "sale_date": v.sale_date,
        "photo_url": v.photo_url,
        "description": v.description,
        "status": v.status(),
        "is_available": v.is_available(),
        "repairs_total": repairs_total,
        "sale_price": sale_price,
        "display_purchase_price": prices.format(v.purchase_price),
        "display_sale_price": prices.format(sale_price),
    })
}

pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let db = state.db();
    let statut = query.statut.unwrap_or_else(|| "disponibles".to_string());

    let mut select = Vehicle::find();
    select = match statut.to_lowercase().as_str() {
        // Historical quirk kept on purpose: the default bucket is
        // "not yet sold", which still includes units in repair. The true
        // available-only filter is the fallback arm below.
        "disponibles" => select.filter(vehicle::Column::SaleDate.is_null()),
        "reparation" => select.filter(vehicle::Column::AvailableDate.is_null()),
        "vendues" => select.filter(vehicle::Column::SaleDate.is_not_null()),
        "toutes" => select,
        _ => select
            .filter(vehicle::Column::AvailableDate.is_not_null())
            .filter(vehicle::Column::SaleDate.is_null()),
    };

    let vehicles = select
        .order_by_desc(vehicle::Column::PurchaseDate)
        .all(db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let names = catalog_names(db, &vehicles)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    // Repair totals for every listed vehicle in one query
    let vehicle_ids: Vec<i32> = vehicles.iter().map(|v| v.id).collect();
    let mut totals: HashMap<i32, f64> = HashMap::new();
    if !vehicle_ids.is_empty() {
        for r in Repair::find()
            .filter(repair::Column::VehicleId.is_in(vehicle_ids))
            .all(db)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        {
            *totals.entry(r.vehicle_id).or_insert(0.0) += r.cost;
        }
    }

    let rows: Vec<Value> = vehicles
        .iter()
        .map(|v| {
            vehicle_row(
                v,
                &names,
                totals.get(&v.id).copied().unwrap_or(0.0),
                &state.prices,
            )
        })
        .collect();

    Ok(Json(json!({
        "vehicles": rows,
        "total": rows.len(),
        "statut": statut,
    })))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.db();

    let v = Vehicle::find_by_id(id)
        .one(db)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    let repairs = Repair::find()
        .filter(repair::Column::VehicleId.eq(id))
        .order_by_asc(repair::Column::Id)
        .all(db)
        .await
        .map_err(internal)?;

    let repairs_total: f64 = repairs.iter().map(|r| r.cost).sum();
    let names = catalog_names(db, std::slice::from_ref(&v))
        .await
        .map_err(internal)?;

    let mut body = vehicle_row(&v, &names, repairs_total, &state.prices);
    body["repairs"] = json!(repairs);
    body["display_repairs_total"] = json!(state.prices.format(repairs_total));

    Ok(Json(json!({ "vehicle": body })))
}

fn internal(e: DbErr) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Vehicle not found" })),
    )
}

fn form_errors(errors: Map<String, Value>, fields: &HashMap<String, String>) -> Response {
    // Echo the submitted values so the form can be re-rendered as-is
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": errors, "values": fields })),
    )
        .into_response()
}

pub async fn create_vehicle(
    _admin: AdminClaims,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let db = state.db();

    let (fields, photo) = match read_form(&mut multipart).await {
        Ok(parts) => parts,
        Err(resp) => return resp,
    };

    let form = match VehicleForm::parse(&fields) {
        Ok(form) => form,
        Err(errors) => return form_errors(errors, &fields),
    };

    if let Some(vin) = &form.vin {
        match vin_taken(db, vin, None).await {
            Ok(true) => {
                let mut errors = Map::new();
                errors.insert(
                    "vin".to_string(),
                    json!("A vehicle with this VIN already exists."),
                );
                return form_errors(errors, &fields);
            }
            Ok(false) => {}
            Err(e) => return internal(e).into_response(),
        }
    }

    // Photo upload before the insert so the row records its final path
    let photo_url = match photo {
        Some((original_name, data)) => match store_photo(&state.upload_dir, &original_name, &data) {
            Ok(url) => Some(url),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let now = Utc::now().to_rfc3339();
    let new_vehicle = vehicle::ActiveModel {
        vin: Set(form.vin),
        year: Set(form.year),
        brand_id: Set(form.brand_id),
        model_id: Set(form.model_id),
        trim_id: Set(form.trim_id),
        purchase_date: Set(form.purchase_date),
        purchase_price: Set(form.purchase_price),
        available_date: Set(form.available_date),
        sale_date: Set(form.sale_date),
        photo_url: Set(photo_url),
        description: Set(form.description),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = match new_vehicle.insert(db).await {
        Ok(v) => v,
        Err(e) => return internal(e).into_response(),
    };

    let names = match catalog_names(db, std::slice::from_ref(&created)).await {
        Ok(n) => n,
        Err(e) => return internal(e).into_response(),
    };
    let (brand_name, model_name, _) = names.get(&created);

    tracing::info!("Vehicle {} {} ({}) added", brand_name, model_name, created.year);

    (
        StatusCode::CREATED,
        Json(json!({
            "vehicle": vehicle_row(&created, &names, 0.0, &state.prices),
            "message": format!(
                "Vehicle {} {} ({}) added successfully",
                brand_name, model_name, created.year
            ),
        })),
    )
        .into_response()
}

/// Nested repair entries riding along on the vehicle update form.
///
/// An entry without an id and with a non-empty description is inserted;
/// an entry with an id is updated. There is no removal through this path,
/// the repair history stays append-only here.
async fn upsert_repairs(
    db: &DatabaseConnection,
    vehicle_id: i32,
    entries: Vec<RepairDto>,
) -> Result<(), (StatusCode, Json<Value>)> {
    let now = Utc::now().to_rfc3339();

    for entry in entries {
        let description = entry.description.trim().to_string();

        match entry.id {
            None => {
                if description.is_empty() {
                    // Blank rows from the form grid are ignored
                    continue;
                }
                if let Err(resp) = validate_repair(&description, entry.cost) {
                    return Err(resp);
                }
                let new_repair = repair::ActiveModel {
                    vehicle_id: Set(vehicle_id),
                    description: Set(description),
                    cost: Set(round_cents(entry.cost)),
                    repair_date: Set(entry.repair_date),
                    created_at: Set(now.clone()),
                    updated_at: Set(now.clone()),
                    ..Default::default()
                };
                new_repair.insert(db).await.map_err(internal)?;
            }
            Some(repair_id) => {
                if let Err(resp) = validate_repair(&description, entry.cost) {
                    return Err(resp);
                }
                let existing = Repair::find_by_id(repair_id)
                    .one(db)
                    .await
                    .map_err(internal)?;
                let Some(existing) = existing else {
                    continue;
                };
                let mut active: repair::ActiveModel = existing.into();
                active.description = Set(description);
                active.cost = Set(round_cents(entry.cost));
                active.repair_date = Set(entry.repair_date);
                active.updated_at = Set(now.clone());
                active.update(db).await.map_err(internal)?;
            }
        }
    }

    Ok(())
}

fn validate_repair(description: &str, cost: f64) -> Result<(), (StatusCode, Json<Value>)> {
    let mut errors = Map::new();
    if description.is_empty() {
        errors.insert("description".to_string(), json!("Description is required"));
    } else if description.chars().count() > 500 {
        errors.insert(
            "description".to_string(),
            json!("Description must be 500 characters or fewer"),
        );
    }
    if !(cost > 0.0 && cost <= 99_999.99) {
        errors.insert(
            "cost".to_string(),
            json!("Cost must be positive and at most 99999.99"),
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err((StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))))
    }
}

pub async fn update_vehicle(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Response {
    let db = state.db();

    let existing = match Vehicle::find_by_id(id).one(db).await {
        Ok(Some(v)) => v,
        Ok(None) => return not_found().into_response(),
        Err(e) => return internal(e).into_response(),
    };

    let (fields, photo) = match read_form(&mut multipart).await {
        Ok(parts) => parts,
        Err(resp) => return resp,
    };

    let form = match VehicleForm::parse(&fields) {
        Ok(form) => form,
        Err(errors) => return form_errors(errors, &fields),
    };

    if let Some(vin) = &form.vin {
        match vin_taken(db, vin, Some(id)).await {
            Ok(true) => {
                let mut errors = Map::new();
                errors.insert(
                    "vin".to_string(),
                    json!("A vehicle with this VIN already exists."),
                );
                return form_errors(errors, &fields);
            }
            Ok(false) => {}
            Err(e) => return internal(e).into_response(),
        }
    }

    let repairs: Vec<RepairDto> = match fields.get("repairs") {
        Some(raw) if !raw.trim().is_empty() => match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                let mut errors = Map::new();
                errors.insert("repairs".to_string(), json!(format!("Invalid repairs payload: {}", e)));
                return form_errors(errors, &fields);
            }
        },
        _ => Vec::new(),
    };

    let photo_url = match photo {
        Some((original_name, data)) => match store_photo(&state.upload_dir, &original_name, &data) {
            Ok(url) => Some(url),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e })),
                )
                    .into_response();
            }
        },
        None => existing.photo_url.clone(),
    };

    let mut active: vehicle::ActiveModel = existing.into();
    active.vin = Set(form.vin);
    active.year = Set(form.year);
    active.brand_id = Set(form.brand_id);
    active.model_id = Set(form.model_id);
    active.trim_id = Set(form.trim_id);
    active.purchase_date = Set(form.purchase_date);
    active.purchase_price = Set(form.purchase_price);
    active.available_date = Set(form.available_date);
    active.sale_date = Set(form.sale_date);
    active.photo_url = Set(photo_url);
    active.description = Set(form.description);
    active.updated_at = Set(Utc::now().to_rfc3339());

    let updated = match active.update(db).await {
        Ok(v) => v,
        Err(DbErr::RecordNotUpdated) => {
            // Concurrent writer: if the row is gone this is a plain
            // not-found; if it still exists the conflict is re-raised
            // rather than retried
            match Vehicle::find_by_id(id).one(db).await {
                Ok(None) => return not_found().into_response(),
                Ok(Some(_)) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "concurrent update conflict" })),
                    )
                        .into_response();
                }
                Err(e) => return internal(e).into_response(),
            }
        }
        Err(e) => return internal(e).into_response(),
    };

    if let Err(resp) = upsert_repairs(db, updated.id, repairs).await {
        return resp.into_response();
    }

    let names = match catalog_names(db, std::slice::from_ref(&updated)).await {
        Ok(n) => n,
        Err(e) => return internal(e).into_response(),
    };

    let all_repairs = match Repair::find()
        .filter(repair::Column::VehicleId.eq(updated.id))
        .order_by_asc(repair::Column::Id)
        .all(db)
        .await
    {
        Ok(r) => r,
        Err(e) => return internal(e).into_response(),
    };
    let repairs_total: f64 = all_repairs.iter().map(|r| r.cost).sum();

    let mut body = vehicle_row(&updated, &names, repairs_total, &state.prices);
    body["repairs"] = json!(all_repairs);

    Json(json!({
        "vehicle": body,
        "message": "Vehicle updated successfully",
    }))
    .into_response()
}

pub async fn delete_vehicle(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.db();

    let existing = Vehicle::find_by_id(id)
        .one(db)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    // Owned repairs go first; the cascade is explicit
    Repair::delete_many()
        .filter(repair::Column::VehicleId.eq(id))
        .exec(db)
        .await
        .map_err(internal)?;

    match existing.delete(db).await {
        Ok(_) => Ok(Json(json!({ "message": "Vehicle deleted successfully" }))),
        Err(e) => {
            tracing::warn!("Vehicle {} delete refused by storage: {}", id, e);
            Err((
                StatusCode::CONFLICT,
                Json(json!({ "error": "Unable to delete this vehicle." })),
            ))
        }
    }
}

pub async fn mark_available(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.db();
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let v = Vehicle::find_by_id(id)
        .one(db)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    let mut active: vehicle::ActiveModel = v.into();
    active.available_date = Set(Some(now));
    active.updated_at = Set(Utc::now().to_rfc3339());
    let updated = active.update(db).await.map_err(internal)?;

    Ok(Json(json!({
        "vehicle": updated,
        "message": "The vehicle has been marked as available.",
    })))
}

pub async fn mark_sold(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let db = state.db();
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let v = Vehicle::find_by_id(id)
        .one(db)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    // A unit must have been put on the lot before it can be sold
    if v.available_date.is_none() {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "A vehicle must be available before it can be sold." })),
        ));
    }

    let mut active: vehicle::ActiveModel = v.into();
    active.sale_date = Set(Some(now));
    active.updated_at = Set(Utc::now().to_rfc3339());
    let updated = active.update(db).await.map_err(internal)?;

    Ok(Json(json!({
        "vehicle": updated,
        "message": "The vehicle has been marked as sold.",
    })))
}
