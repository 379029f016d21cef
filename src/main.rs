use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Parser, Subcommand};
use serde_json::json;
use sqlx::PgPool;

use taskvault::config::Config;
use taskvault::models::{RegisterInput, Role};
use taskvault::routes;
use taskvault::services::{AppState, UserService};
use taskvault::store::postgres::PgStore;
use taskvault::store::Store;
use taskvault::validation;

#[derive(Parser)]
#[command(name = "taskvault", about = "Users-and-tasks REST API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve,
    /// Create an admin account. Public registration only produces regular
    /// users, so this is the one way admins come to exist.
    GenerateAdmin { email: String, password: String },
}

async fn connect_store() -> Arc<dyn Store> {
    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let store = PgStore::new(pool);
    store.migrate().await.expect("Failed to run schema setup");
    Arc::new(store)
}

async fn serve() -> std::io::Result<()> {
    let config = Config::from_env();
    let state = web::Data::new(AppState::new(connect_store().await));

    log::info!("Starting taskvault server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config))
    })
    .bind(config.bind_addr())?
    .run()
    .await
}

async fn generate_admin(email: String, password: String) -> std::io::Result<()> {
    // Same shape checks the login route applies to credentials.
    let credentials = json!({ "email": email, "password": password });
    if let Err(err) = validation::validate(&credentials, &validation::LOGIN) {
        eprintln!("Invalid admin credentials: {}", err);
        std::process::exit(1);
    }

    let users = UserService::new(connect_store().await);
    let input = RegisterInput {
        first_name: "Admin".to_string(),
        last_name: "Account".to_string(),
        email,
        password,
        role: Role::Admin,
    };

    match users.register(input).await {
        Ok(user) => {
            println!("Created admin user {} ({})", user.email, user.id);
            Ok(())
        }
        Err(err) => {
            eprintln!("Failed to create admin user: {}", err);
            std::process::exit(1);
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::GenerateAdmin { email, password } => generate_admin(email, password).await,
    }
}
