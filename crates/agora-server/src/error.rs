use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required configuration: set {env_var}")]
    MissingEnvVar { env_var: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

/// Map a dotted settings path to the environment variable that supplies it.
pub fn to_env_var(field: &str) -> String {
    format!("AGORA_{}", field.replace('.', "__").to_uppercase())
}
