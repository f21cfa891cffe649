use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub omdb: OmdbConfig,
    pub firebase: FirebaseConfig,
    /// Catalog ids shown by `browse` when the user has no query.
    #[serde(default = "default_recommendations")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: String,
}

fn default_recommendations() -> Vec<String> {
    [
        "tt0245429", // Spirited Away
        "tt15398776", // Oppenheimer
        "tt9100054",
        "tt0111161", // The Shawshank Redemption
        "tt0068646", // The Godfather
        "tt0468569", // The Dark Knight
        "tt0137523", // Fight Club
        "tt0109830", // Forrest Gump
        "tt1375666", // Inception
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.api_key.is_empty() || self.omdb.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!(
                "OMDb api_key is not configured (get one at https://www.omdbapi.com/apikey.aspx)"
            ));
        }
        if self.firebase.project_id.is_empty() || self.firebase.project_id == "YOUR_PROJECT_ID" {
            return Err(anyhow::anyhow!("Firebase project_id is not configured"));
        }
        if self.firebase.api_key.is_empty() || self.firebase.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!("Firebase api_key is not configured"));
        }
        for id in &self.recommendations {
            if id.trim().is_empty() {
                return Err(anyhow::anyhow!("recommendations contains an empty catalog id"));
            }
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.omdb.api_key.is_empty() && self.omdb.api_key != "YOUR_API_KEY"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            omdb: OmdbConfig {
                api_key: String::new(),
            },
            firebase: FirebaseConfig {
                project_id: String::new(),
                api_key: String::new(),
            },
            recommendations: default_recommendations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            omdb: OmdbConfig {
                api_key: "abc123".to_string(),
            },
            firebase: FirebaseConfig {
                project_id: "screenlog-test".to_string(),
                api_key: "firebase_key".to_string(),
            },
            recommendations: vec!["tt0111161".to_string()],
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.api_key, "abc123");
        assert_eq!(loaded.firebase.project_id, "screenlog-test");
        assert_eq!(loaded.recommendations, vec!["tt0111161".to_string()]);
    }

    #[test]
    fn test_config_defaults_recommendations() {
        let parsed: Config = toml::from_str(
            r#"
            [omdb]
            api_key = "abc123"

            [firebase]
            project_id = "p"
            api_key = "k"
            "#,
        )
        .unwrap();
        assert!(!parsed.recommendations.is_empty());
        assert!(parsed.recommendations.contains(&"tt0111161".to_string()));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config {
            omdb: OmdbConfig {
                api_key: "YOUR_API_KEY".to_string(),
            },
            firebase: FirebaseConfig {
                project_id: "p".to_string(),
                api_key: "k".to_string(),
            },
            recommendations: Vec::new(),
        };

        assert!(config.validate().is_err());
        assert!(!config.is_catalog_configured());

        config.omdb.api_key = "real_key".to_string();
        assert!(config.validate().is_ok());
        assert!(config.is_catalog_configured());
    }
}
