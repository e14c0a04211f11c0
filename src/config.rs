use std::env;
use anyhow::{bail, Context, Result};

pub const DEFAULT_TABLE_NAME: &str = "Notes";

/// Which `NoteStore` implementation backs the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("NOTES_STORE must be one of: dynamodb, memory, got '{}'", other),
        }
    }
}

/// How the process receives requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Invoked by the Lambda runtime API
    Lambda,
    /// Standalone axum server for local development
    Local,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub store_backend: StoreBackend,
    pub dynamodb_endpoint: Option<String>,
    pub run_mode: RunMode,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let table_name = env::var("TABLE_NAME")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let store_backend = env::var("NOTES_STORE")
            .map(|value| StoreBackend::parse(&value))
            .unwrap_or(Ok(StoreBackend::DynamoDb))
            .context("Invalid NOTES_STORE environment variable")?;

        let dynamodb_endpoint = env::var("AWS_ENDPOINT_URL").ok();

        let run_mode = if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
            RunMode::Lambda
        } else {
            RunMode::Local
        };

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            table_name,
            store_backend,
            dynamodb_endpoint,
            run_mode,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Run mode: {:?}", self.run_mode);
        tracing::info!("  Store backend: {:?}", self.store_backend);
        tracing::info!("  Table name: {}", self.table_name);
        tracing::info!("  DynamoDB endpoint: {}",
            self.dynamodb_endpoint.as_deref().unwrap_or("default (AWS)"));
        if self.run_mode == RunMode::Local {
            tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
        }
    }
}
