//! Command implementations.

pub mod caption;
pub mod config;
pub mod samples;
pub mod serve;

use clap::Args;
use framecap_core::Config;

/// Per-invocation overrides of the `[model]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct ModelOverrides {
    /// AWS region hosting the model
    #[arg(long, env = "FRAMECAP_REGION")]
    pub region: Option<String>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
}

impl ModelOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(region) = &self.region {
            config.model.region = region.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.model.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.model.temperature = temperature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_touch_set_fields() {
        let mut config = Config::default();
        let overrides = ModelOverrides {
            region: None,
            max_tokens: Some(128),
            temperature: None,
        };
        overrides.apply(&mut config);
        assert_eq!(config.model.max_tokens, 128);
        assert_eq!(config.model.region, "us-east-2");
        assert_eq!(config.model.temperature, 1.0);
    }
}
