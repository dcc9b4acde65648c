//! Database seeder for Atria HRM development and testing.
//!
//! Seeds an admin account, a sample employee, and the default leave
//! policies for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use atria_core::auth::hash_password;
use atria_db::UserRepository;
use atria_db::entities::{employees, leave_policies};

/// Admin login for local development.
const ADMIN_EMAIL: &str = "admin@atria.local";
/// Sample employee ID (consistent for all seeds)
const SAMPLE_EMPLOYEE_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = atria_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding sample employee...");
    seed_sample_employee(&db).await;

    println!("Seeding leave policies...");
    seed_leave_policies(&db).await;

    println!("Seeding complete!");
}

fn sample_employee_id() -> Uuid {
    Uuid::parse_str(SAMPLE_EMPLOYEE_ID).unwrap()
}

/// Seeds an admin account for development.
async fn seed_admin_user(db: &DatabaseConnection) {
    let repo = UserRepository::new(db.clone());

    match repo.email_exists(ADMIN_EMAIL).await {
        Ok(true) => {
            println!("  Admin user already exists, skipping...");
            return;
        }
        Ok(false) => {}
        Err(e) => {
            eprintln!("Failed to check for admin user: {e}");
            return;
        }
    }

    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@1234".into());
    let password_hash = hash_password(&password).expect("Failed to hash admin password");

    if let Err(e) = repo
        .create(ADMIN_EMAIL, &password_hash, "Atria Admin", "ADMIN", None)
        .await
    {
        eprintln!("Failed to insert admin user: {e}");
    } else {
        println!("  Created admin user: {ADMIN_EMAIL}");
    }
}

/// Seeds a sample employee record for development.
async fn seed_sample_employee(db: &DatabaseConnection) {
    if employees::Entity::find_by_id(sample_employee_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Sample employee already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let employee = employees::ActiveModel {
        id: Set(sample_employee_id()),
        person_no: Set("EMP-0001".to_string()),
        first_name: Set("Asha".to_string()),
        last_name: Set("Verma".to_string()),
        work_email: Set("asha.verma@atria.local".to_string()),
        personal_email: Set(None),
        phone: Set(None),
        department: Set(Some("Engineering".to_string())),
        designation: Set(Some("Software Engineer".to_string())),
        location: Set(Some("Bengaluru".to_string())),
        status: Set("ACTIVE".to_string()),
        hire_date: Set(Some(now.date_naive())),
        gender: Set(None),
        address: Set(None),
        emergency_contact: Set(None),
        education_qualification: Set(None),
        birthdate: Set(None),
        manager_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    if let Err(e) = employee.insert(db).await {
        eprintln!("Failed to insert sample employee: {e}");
    } else {
        println!("  Created sample employee: EMP-0001");
    }
}

/// Seeds the default leave policies.
async fn seed_leave_policies(db: &DatabaseConnection) {
    let policies = [
        ("Casual Leave", "YEARLY", Some(Decimal::from(12))),
        ("Sick Leave", "YEARLY", Some(Decimal::from(10))),
        ("Earned Leave", "YEARLY", Some(Decimal::from(15))),
        ("Comp Off", "MONTHLY", None),
    ];

    let mut inserted = 0;
    for (name, period, max_per_period) in policies {
        // Policies are matched by name; re-running the seeder is safe
        let exists = leave_policies::Entity::find()
            .filter(leave_policies::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let policy = leave_policies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            period: Set(period.to_string()),
            max_per_period: Set(max_per_period),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = policy.insert(db).await {
            eprintln!("Failed to insert leave policy {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} leave policies");
}
