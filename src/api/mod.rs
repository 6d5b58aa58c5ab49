pub mod auth;
pub mod brands;
pub mod car_models;
pub mod catalog;
pub mod health;
pub mod lookup;
pub mod repairs;
pub mod trims;
pub mod vehicles;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use self::brands::Brands;
use self::car_models::CarModels;
use self::trims::Trims;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::get_me))
        // Catalog hierarchy: one generic CRUD component, three instantiations
        .route(
            "/brands",
            get(catalog::list::<Brands>).post(catalog::create::<Brands>),
        )
        .route(
            "/brands/:id",
            get(catalog::get_one::<Brands>)
                .put(catalog::update::<Brands>)
                .delete(catalog::delete::<Brands>),
        )
        .route(
            "/models",
            get(catalog::list::<CarModels>).post(catalog::create::<CarModels>),
        )
        .route(
            "/models/:id",
            get(catalog::get_one::<CarModels>)
                .put(catalog::update::<CarModels>)
                .delete(catalog::delete::<CarModels>),
        )
        .route(
            "/trims",
            get(catalog::list::<Trims>).post(catalog::create::<Trims>),
        )
        .route(
            "/trims/:id",
            get(catalog::get_one::<Trims>)
                .put(catalog::update::<Trims>)
                .delete(catalog::delete::<Trims>),
        )
        // Vehicles
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/vehicles/:id",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/vehicles/:id/mark-available", post(vehicles::mark_available))
        .route("/vehicles/:id/mark-sold", post(vehicles::mark_sold))
        // Repairs (always scoped through their owning vehicle)
        .route("/vehicles/:id/repairs", post(repairs::create_repair))
        .route(
            "/repairs/:id",
            put(repairs::update_repair).delete(repairs::delete_repair),
        )
        // Cascading dropdown lookups
        .route("/lookup/models", get(lookup::models_by_brand))
        .route("/lookup/trims", get(lookup::trims_by_model))
        .with_state(state)
}
