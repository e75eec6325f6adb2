use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = parse_var("PORT", 8000u16);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let max_upload_bytes = megabytes(parse_var("MAX_UPLOAD_MB", 50usize));

        Self {
            port,
            static_dir,
            max_upload_bytes,
        }
    }
}

fn parse_var<T: FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => parse_or_default(name, &value, default),
        Err(_) => default,
    }
}

fn parse_or_default<T: FromStr + std::fmt::Display>(name: &str, value: &str, default: T) -> T {
    value.trim().parse::<T>().unwrap_or_else(|_| {
        log::warn!("Ignoring invalid {}={:?}, using {}", name, value, default);
        default
    })
}

fn megabytes(mb: usize) -> usize {
    mb.saturating_mul(1024).saturating_mul(1024)
}
