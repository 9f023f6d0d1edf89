use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    /// Rows per list page; read into every Index request.
    pub page_size: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("PAGE_SIZE must be an integer"),
        }
    }
}
