//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<LockrainConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let config: LockrainConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
scene:
  number_of_lines: 8
  numbers_per_line: 5

render:
  fps: 24
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scene.number_of_lines, 8);
        assert_eq!(config.scene.numbers_per_line, 5);
        assert_eq!(config.render.fps, 24);
        // Untouched sections come back with defaults
        assert_eq!(config.camera.distance, 70.0);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let yaml = "scene:\n  number_of_lines: 0\n";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/no/such/lockrain.yaml"));
        assert!(result.is_err());
    }
}
