use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create users table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create brands table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS brands (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create car_models table; a model name repeats across brands but not
    // within one
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS car_models (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brand_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (name, brand_id),
            FOREIGN KEY (brand_id) REFERENCES brands(id)
        );
        CREATE INDEX IF NOT EXISTS idx_car_models_brand_id ON car_models(brand_id);
        "#
        .to_owned(),
    ))
    .await?;

    // Create trims table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS trims (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            model_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (name, model_id),
            FOREIGN KEY (model_id) REFERENCES car_models(id)
        );
        CREATE INDEX IF NOT EXISTS idx_trims_model_id ON trims(model_id);
        "#
        .to_owned(),
    ))
    .await?;

    // Create vehicles table. SQLite allows multiple NULLs under a UNIQUE
    // column, which is exactly the vin rule.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            vin TEXT UNIQUE,
            year INTEGER NOT NULL,
            brand_id INTEGER NOT NULL,
            model_id INTEGER NOT NULL,
            trim_id INTEGER NOT NULL,
            purchase_date TEXT NOT NULL,
            purchase_price REAL NOT NULL,
            available_date TEXT,
            sale_date TEXT,
            photo_url TEXT,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (brand_id) REFERENCES brands(id),
            FOREIGN KEY (model_id) REFERENCES car_models(id),
            FOREIGN KEY (trim_id) REFERENCES trims(id)
        );
        CREATE INDEX IF NOT EXISTS idx_vehicles_brand_id ON vehicles(brand_id);
        CREATE INDEX IF NOT EXISTS idx_vehicles_model_id ON vehicles(model_id);
        CREATE INDEX IF NOT EXISTS idx_vehicles_trim_id ON vehicles(trim_id);
        CREATE INDEX IF NOT EXISTS idx_vehicles_purchase_date ON vehicles(purchase_date);
        CREATE INDEX IF NOT EXISTS idx_vehicles_sale_date ON vehicles(sale_date);
        "#
        .to_owned(),
    ))
    .await?;

    // Create repairs table. Rows are removed explicitly when their vehicle
    // is deleted, so the cascade does not depend on the foreign_keys pragma.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS repairs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            vehicle_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            cost REAL NOT NULL,
            repair_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (vehicle_id) REFERENCES vehicles(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_repairs_vehicle_id ON repairs(vehicle_id);
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
