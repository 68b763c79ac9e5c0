//! Database seeder for Opexhub development and testing.
//!
//! Seeds master data (vendors, services, classification codes) and a couple
//! of sample projects with monthly plans for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use opexhub_db::entities::{budget_codes, monthly_records, projects, services, vendors};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = opexhub_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding vendors...");
    seed_vendors(&db).await;

    println!("Seeding services...");
    seed_services(&db).await;

    println!("Seeding classification codes...");
    seed_codes(&db).await;

    println!("Seeding sample projects...");
    seed_projects(&db).await;

    println!("Seeding complete!");
}

async fn seed_vendors(db: &DatabaseConnection) {
    let rows = [
        ("V1A2B", "120-81-00001", "Hanbit Systems", Some("HANBIT")),
        ("V3C4D", "220-81-00002", "Daeil Networks", Some("DAEIL")),
    ];

    for (vendor_id, biz_reg_no, name, sap_cd) in rows {
        let existing = vendors::Entity::find_by_id(vendor_id.to_string())
            .one(db)
            .await
            .expect("vendor lookup failed");
        if existing.is_some() {
            continue;
        }
        let now = Utc::now().into();
        vendors::ActiveModel {
            vendor_id: Set(vendor_id.to_string()),
            biz_reg_no: Set(biz_reg_no.to_string()),
            vendor_name: Set(name.to_string()),
            sap_vendor_cd: Set(sap_cd.map(String::from)),
            vendor_alias: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("vendor insert failed");
    }
}

async fn seed_services(db: &DatabaseConnection) {
    let rows = [
        ("SVC-10A0", "Infra operations", "ITO", true),
        ("SVC-20B1", "Helpdesk", "SM", false),
    ];

    for (svc_id, name, contract_type, is_resident) in rows {
        let existing = services::Entity::find_by_id(svc_id.to_string())
            .one(db)
            .await
            .expect("service lookup failed");
        if existing.is_some() {
            continue;
        }
        let now = Utc::now().into();
        services::ActiveModel {
            svc_id: Set(svc_id.to_string()),
            svc_name: Set(name.to_string()),
            contract_type: Set(Some(contract_type.to_string())),
            is_resident: Set(is_resident),
            operator_names: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("service insert failed");
    }
}

async fn seed_codes(db: &DatabaseConnection) {
    let rows = [
        ("BUDGET_L1_001", "IT Operations", None, "BUDGET_L1"),
        ("BUDGET_L1_002", "IT Development", None, "BUDGET_L1"),
        ("BUDGET_L2_001", "Maintenance", Some("BUDGET_L1_001"), "BUDGET_L2"),
        ("IT_TYPE_001", "Run", None, "IT_TYPE"),
    ];

    for (code_id, name, parent, code_type) in rows {
        let existing = budget_codes::Entity::find_by_id(code_id.to_string())
            .one(db)
            .await
            .expect("code lookup failed");
        if existing.is_some() {
            continue;
        }
        budget_codes::ActiveModel {
            code_id: Set(code_id.to_string()),
            code_name: Set(name.to_string()),
            parent_code_id: Set(parent.map(String::from)),
            code_type: Set(code_type.to_string()),
            sort_order: Set(0),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("code insert failed");
    }
}

async fn seed_projects(db: &DatabaseConnection) {
    let rows = [
        ("A-001", "Groupware maintenance", "A", "V1A2B"),
        ("A-002", "Network line fees", "A", "V3C4D"),
        ("B-001", "ERP license renewal", "B", "V1A2B"),
    ];

    for (proj_id, name, dept, vendor_id) in rows {
        let existing = projects::Entity::find_by_id(proj_id.to_string())
            .one(db)
            .await
            .expect("project lookup failed");
        if existing.is_some() {
            continue;
        }
        let now = Utc::now().into();
        projects::ActiveModel {
            proj_id: Set(proj_id.to_string()),
            proj_name: Set(name.to_string()),
            fiscal_year: Set("2025".to_string()),
            dept_code: Set(dept.to_string()),
            vendor_id: Set(Some(vendor_id.to_string())),
            proj_status: Set("ACTIVE".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("project insert failed");

        for month in 1..=12u8 {
            let yyyymm = format!("2025{month:02}");
            let exists = monthly_records::Entity::find()
                .filter(monthly_records::Column::ProjId.eq(proj_id))
                .filter(monthly_records::Column::Yyyymm.eq(&yyyymm))
                .one(db)
                .await
                .expect("monthly lookup failed");
            if exists.is_some() {
                continue;
            }
            monthly_records::ActiveModel {
                proj_id: Set(proj_id.to_string()),
                yyyymm: Set(yyyymm),
                plan_amt: Set(dec!(5_000_000)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("monthly insert failed");
        }
    }
}
