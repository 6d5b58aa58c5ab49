use crate::auth::hash_password;
use crate::models::{brand, car_model, trim, user};
use sea_orm::*;

/// Demo catalog and a default admin account, inserted once.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Admin user
    let admin_password = hash_password("admin")
        .map_err(|e| DbErr::Custom(format!("Failed to hash seed password: {}", e)))?;

    let admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password_hash: Set(admin_password),
        role: Set("admin".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    user::Entity::insert(admin)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    // 2. Brands
    if brand::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let brands = [
        "Toyota",
        "Peugeot",
        "Ford",
        "Volkswagen",
        "Renault",
        "Citroën",
        "Fiat",
        "Dodge",
        "Porsche",
    ];

    let mut brand_ids = Vec::new();
    for name in brands {
        let created = brand::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        brand_ids.push(created.id);
    }

    // 3. Models, two per brand
    let models = [
        ("Corolla", 0),
        ("Yaris", 0),
        ("208", 1),
        ("3008", 1),
        ("Focus", 2),
        ("Mustang", 2),
        ("Golf", 3),
        ("Passat", 3),
        ("Clio", 4),
        ("Mégane", 4),
        ("C3", 5),
        ("C4", 5),
        ("500", 6),
        ("Panda", 6),
        ("Challenger", 7),
        ("Charger", 7),
        ("911", 8),
        ("Cayenne", 8),
    ];

    let mut model_ids = Vec::new();
    for (name, brand_idx) in models {
        let created = car_model::ActiveModel {
            name: Set(name.to_owned()),
            brand_id: Set(brand_ids[brand_idx]),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        model_ids.push(created.id);
    }

    // 4. Trims
    let trims = [
        ("Standard", 0),
        ("GR Sport", 0),
        ("Active", 2),
        ("Allure", 2),
        ("Trend", 4),
        ("ST-Line", 4),
        ("Style", 6),
        ("R-Line", 6),
        ("Evolution", 8),
        ("Esprit Alpine", 8),
        ("You", 10),
        ("Max", 10),
        ("Pop", 12),
        ("La Prima", 12),
        ("SXT", 14),
        ("GT", 14),
        ("Carrera", 16),
        ("GT3 RS", 16),
    ];

    for (name, model_idx) in trims {
        trim::ActiveModel {
            name: Set(name.to_owned()),
            model_id: Set(model_ids[model_idx]),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
