use std::env;

/// Everything the process reads from the environment, resolved once at
/// startup and handed to the workers as `web::Data<EnvConfig>`.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub cors_allowed_origins: Vec<String>,
    pub allowed_teacher_emails: Vec<String>,
    pub access_token_lifetime_mins: i64,
    pub refresh_token_lifetime_days: i64,
    pub rotate_refresh_tokens: bool,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_csv(key: &str) -> Vec<String> {
        env::var(key)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: Self::get_env("PORT").parse().unwrap_or(8080),
            db_url: Self::get_env("DATABASE_URL"),
            secret_key: Self::get_env("SECRET_KEY"),
            debug: env::var("DEBUG").map(|v| v == "true" || v == "1").unwrap_or(false),
            allowed_hosts: Self::get_csv("ALLOWED_HOSTS"),
            cors_allowed_origins: Self::get_csv("CORS_ALLOWED_ORIGINS"),
            allowed_teacher_emails: Self::get_csv("ALLOWED_TEACHER_EMAILS"),
            access_token_lifetime_mins: env::var("ACCESS_TOKEN_LIFETIME_MINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            refresh_token_lifetime_days: env::var("REFRESH_TOKEN_LIFETIME_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            rotate_refresh_tokens: env::var("ROTATE_REFRESH_TOKENS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    pub fn teacher_email_allowed(&self, email: &str) -> bool {
        self.allowed_teacher_emails.iter().any(|e| e == email)
    }
}
