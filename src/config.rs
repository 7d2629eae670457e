/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::ConfigError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub dispatch: DispatchConfig,
    pub sampler: SamplerConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DispatchConfig {
    pub n_elevators: u32,
    pub n_floors: u32,
    pub wait_secs: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SamplerConfig {
    pub n_personas: u32,
    pub n_conyuges: u32,
    pub n_hijos: u32,
    pub seed: u64,
    pub min_date: String,
    pub max_date: String,
    #[serde(default = "default_max_rejection_attempts")]
    pub max_rejection_attempts: u32,
}

fn default_max_rejection_attempts() -> u32 {
    1_000_000
}

impl Default for Config {
    fn default() -> Config {
        Config {
            dispatch: DispatchConfig {
                n_elevators: 3,
                n_floors: 10,
                wait_secs: 10,
            },
            sampler: SamplerConfig {
                n_personas: 1000,
                n_conyuges: 50,
                n_hijos: 120,
                seed: 0,
                min_date: "1900-01-01".to_string(),
                max_date: "2022-01-01".to_string(),
                max_rejection_attempts: default_max_rejection_attempts(),
            },
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&config_str).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
