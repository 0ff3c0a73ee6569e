use env_binder::{bind_env, Bindable, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct DatabaseConfig {
    host: String,
    port: Option<String>,
    password: String,
}

impl Bindable for DatabaseConfig {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .required("host", "APP_HOST", |c, v| c.host = v)
            .optional("port", "APP_PORT", |c, v| c.port = v)
            .required("password", "APP_DB_PASSWORD", |c, v| c.password = v)
            .register()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Print what the deployment must provide
    println!("{}", DatabaseConfig::schema().manifest().to_toml()?);

    let config: DatabaseConfig = bind_env()?;

    println!(
        "Database: {}:{} (password set: {})",
        config.host,
        config.port.as_deref().unwrap_or("5432"),
        !config.password.is_empty()
    );

    Ok(())
}
