//! Shared setup for database-backed tests
//!
//! Every test gets its own schema, so tests can run in parallel against one
//! database. Run with:
//! DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use lightbnb_db::db::create_pool_with_options;
use lightbnb_db::{DbConfig, NewProperty, NewUser, PgStore, Property, Store, User};
use sqlx::PgPool;

const SCHEMA_SQL: &str = include_str!("../fixtures/schema.sql");

static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

fn unique_schema() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    let n = SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("lightbnb_test_{}_{}_{}", std::process::id(), nanos, n)
}

pub struct TestDb {
    pub store: PgStore,
    schema: String,
    admin: PgPool,
}

impl TestDb {
    pub async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let admin = PgPool::connect(&url).await.expect("admin connection failed");

        let schema = unique_schema();
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema failed");

        let config = DbConfig {
            url: Some(url),
            max_connections: 2,
            ..DbConfig::default()
        };
        let options = config
            .connect_options()
            .expect("valid connect options")
            .options([("search_path", schema.as_str())]);
        let pool = create_pool_with_options(options, &config)
            .await
            .expect("pool creation failed");

        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&pool)
            .await
            .expect("schema fixture failed");

        Self {
            store: PgStore::new(pool),
            schema,
            admin,
        }
    }

    pub async fn teardown(self) {
        self.store.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema failed");
        self.admin.close().await;
    }

    pub async fn user(&self, n: u32) -> User {
        self.store
            .add_user(&NewUser {
                name: format!("Guest {n}"),
                email: format!("guest{n}@example.com"),
                password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
            })
            .await
            .expect("add user failed")
    }

    pub async fn property(&self, owner_id: Option<i32>, city: &str, cost_per_night: i32) -> Property {
        self.store
            .add_property(&sample_property(owner_id, city, cost_per_night))
            .await
            .expect("add property failed")
    }

    pub async fn review(&self, guest_id: i32, property_id: i32, rating: i16) {
        sqlx::query(
            "INSERT INTO property_reviews (guest_id, property_id, rating) VALUES ($1, $2, $3)",
        )
        .bind(guest_id)
        .bind(property_id)
        .bind(rating)
        .execute(self.store.pool())
        .await
        .expect("add review failed");
    }

    pub async fn reservation(
        &self,
        guest_id: i32,
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> i32 {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO reservations (guest_id, property_id, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(guest_id)
        .bind(property_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(self.store.pool())
        .await
        .expect("add reservation failed");
        id
    }
}

pub fn sample_property(owner_id: Option<i32>, city: &str, cost_per_night: i32) -> NewProperty {
    NewProperty {
        owner_id,
        title: format!("Cozy place in {city}"),
        description: Some("description".to_string()),
        number_of_bedrooms: 3,
        number_of_bathrooms: 2,
        parking_spaces: 1,
        cost_per_night,
        thumbnail_photo_url: "https://images.example/thumb.jpg".to_string(),
        cover_photo_url: "https://images.example/cover.jpg".to_string(),
        street: "536 Namsub Highway".to_string(),
        country: "Canada".to_string(),
        city: city.to_string(),
        province: "British Columbia".to_string(),
        post_code: "28142".to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
