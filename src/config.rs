use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings read once at startup. `DATABASE_URL` is mandatory;
/// the bind address falls back to localhost defaults when unset.
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("SERVER_PORT is not a valid port: {}", raw)),
            Err(_) => DEFAULT_PORT,
        };

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
        }
    }

    /// The address pair `HttpServer::bind` takes.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
