use std::env;
use anyhow::{bail, Context, Result};

/// Which `KvStore` implementation the service runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub redis_host: String,
    pub redis_port: u16,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend = match env::var("KV_BACKEND")
            .unwrap_or_else(|_| "redis".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "redis" => Backend::Redis,
            "memory" => Backend::Memory,
            other => bail!("KV_BACKEND must be one of: redis, memory, got '{}'", other),
        };

        let redis_host = env::var("REDIS_HOST")
            .unwrap_or_else(|_| "redis".to_string());

        let redis_port = env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid port number (0-65535)")?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            backend,
            redis_host,
            redis_port,
            service_port,
            service_host,
        })
    }

    /// Connection URL handed to `redis::Client::open`
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match self.backend {
            Backend::Redis => tracing::info!("  Store: redis at {}:{}", self.redis_host, self.redis_port),
            Backend::Memory => tracing::info!("  Store: in-memory (data is lost on exit)"),
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // The process environment is shared by every test thread.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env_vars() {
        unsafe {
            env::remove_var("KV_BACKEND");
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("SERVICE_PORT");
            env::remove_var("SERVICE_HOST");
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("KV_BACKEND", "Memory");
            env::set_var("REDIS_HOST", "cache.internal");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("SERVICE_PORT", "8080");
            env::set_var("SERVICE_HOST", "127.0.0.1");
        }

        let config = Config::from_env().unwrap();
        clear_env_vars();

        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.redis_host, "cache.internal");
        assert_eq!(config.redis_port, 6380);
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.redis_url(), "redis://cache.internal:6380/");
    }

    #[test]
    fn test_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.backend, Backend::Redis);
        assert_eq!(config.redis_host, "redis");
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.service_port, 8000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.redis_url(), "redis://redis:6379/");
    }

    #[test]
    fn test_invalid_redis_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("REDIS_PORT", "not-a-number");
        }

        let result = Config::from_env();
        clear_env_vars();

        let error = result.unwrap_err();
        assert!(error.to_string().contains("REDIS_PORT"));
    }

    #[test]
    fn test_service_port_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "99999");
        }

        let result = Config::from_env();
        clear_env_vars();

        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_unknown_backend() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("KV_BACKEND", "etcd");
        }

        let result = Config::from_env();
        clear_env_vars();

        let error = result.unwrap_err();
        assert!(error.to_string().contains("KV_BACKEND"));
        assert!(error.to_string().contains("etcd"));
    }
}
