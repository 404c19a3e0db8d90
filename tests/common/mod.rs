use cupcp_backend::config::EnvConfig;
use cupcp_backend::db::postgres_service::PostgresService;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub config: EnvConfig,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let postgres = Postgres::default();
        let container = postgres
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext {
            db,
            config: get_test_config(),
            _container: container,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        secret_key: "test-secret-key".to_string(),
        debug: false,
        allowed_hosts: vec![],
        cors_allowed_origins: vec![],
        allowed_teacher_emails: vec![
            "jane@cu.ac.bd".to_string(),
            "john@cu.ac.bd".to_string(),
        ],
        access_token_lifetime_mins: 30,
        refresh_token_lifetime_days: 1,
        rotate_refresh_tokens: true,
    }
}

// Test data helpers
pub mod test_data {
    use serde_json::{json, Value};

    pub fn student_payload(varsity_id: &str, email: &str, phone: &str, password: &str) -> Value {
        json!({
            "full_name": "Alice Smith",
            "email": email,
            "varsity_id": varsity_id,
            "session": "2024-25",
            "gender": "female",
            "phone_number": phone,
            "password": password,
            "confirm_password": password,
        })
    }

    pub fn teacher_payload(email: &str, phone: &str, password: &str) -> Value {
        json!({
            "full_name": "Dr. Jane Teacher",
            "email": email,
            "phone_number": phone,
            "password": password,
            "confirm_password": password,
        })
    }

    pub fn registration_payload(payment_slip: Option<&str>) -> Value {
        json!({
            "payment_status": "Yes",
            "payment_slip": payment_slip,
            "student_status": "regular",
            "courses": ["CSE-401", "CSE-403"],
            "hall_name": "Alaol Hall",
        })
    }
}
