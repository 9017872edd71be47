use serde::{Deserialize, Serialize};

use depthfx_core::{BlurParameters, GeneratedShader, KernelMapping, Result, ShaderError, TapStaging};

use crate::builder::generate_by_id;

/// One shader to build at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaderConfig {
    /// Effect id, e.g. `"depthBlur"`.
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<KernelMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<TapStaging>,
}

impl ShaderConfig {
    pub fn effect(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            radius: None,
            variance: None,
            mapping: None,
            staging: None,
        }
    }

    pub fn blur(effect: impl Into<String>, radius: i32, variance: f64) -> Self {
        Self {
            radius: Some(radius),
            variance: Some(variance),
            ..Self::effect(effect)
        }
    }

    /// Kernel parameters, if this entry describes a blur.
    pub fn blur_parameters(&self) -> Result<Option<BlurParameters>> {
        match (self.radius, self.variance) {
            (Some(radius), Some(variance)) => Ok(Some(BlurParameters {
                radius,
                variance,
                mapping: self.mapping,
                staging: self.staging,
            })),
            (None, None) => Ok(None),
            _ => Err(ShaderError::InvalidParameter(format!(
                "'{}' needs both radius and variance, or neither",
                self.effect
            ))),
        }
    }

    pub fn generate(&self) -> Result<GeneratedShader> {
        generate_by_id(&self.effect, self.blur_parameters()?)
    }
}

/// The set of shaders an application builds at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderSetConfig {
    pub shaders: Vec<ShaderConfig>,
}

impl Default for ShaderSetConfig {
    fn default() -> Self {
        Self {
            shaders: vec![
                ShaderConfig::effect("depth"),
                ShaderConfig::effect("depthMask"),
                ShaderConfig::effect("colorToGray"),
                ShaderConfig::blur("fastBlur", 4, 0.2),
                ShaderConfig::blur("depthBlur", 4, 0.2),
                ShaderConfig::effect("screen"),
                ShaderConfig::effect("hsl"),
                ShaderConfig::effect("echo"),
                ShaderConfig::effect("strobe"),
            ],
        }
    }
}

impl ShaderSetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ShaderError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShaderError::Config(e.to_string()))
    }

    /// Generate every configured shader, stopping at the first failure.
    pub fn generate_all(&self) -> Result<Vec<GeneratedShader>> {
        self.shaders.iter().map(ShaderConfig::generate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_generates() {
        let shaders = ShaderSetConfig::default().generate_all().unwrap();
        assert_eq!(shaders.len(), 9);
        assert_eq!(shaders[3].kernel.as_ref().map(|k| k.len()), Some(9));
    }

    #[test]
    fn test_half_specified_blur() {
        let cfg = ShaderConfig {
            radius: Some(3),
            ..ShaderConfig::effect("blur")
        };
        assert!(matches!(cfg.blur_parameters(), Err(ShaderError::InvalidParameter(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "shaders": [
                { "effect": "varDepthBlur", "radius": 3, "variance": 0.5, "mapping": "centered" },
                { "effect": "kuwahara3" }
            ]
        }"#;
        let cfg = ShaderSetConfig::from_json(json).unwrap();
        assert_eq!(cfg.shaders[0].mapping, Some(KernelMapping::Centered));
        assert_eq!(cfg.shaders[0].staging, None);
        assert_eq!(cfg.shaders[1].blur_parameters().unwrap(), None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ShaderSetConfig::from_json("{ shaders: oops"),
            Err(ShaderError::Config(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = ShaderSetConfig::default();
        let back = ShaderSetConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
