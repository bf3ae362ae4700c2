use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Docsynth Configuration

[scan]
extensions = ["py"]
# Substrings of the path relative to the scan root that exclude a file
skip_dir_keywords = ["venv", ".venv", "__pycache__", ".tox", "site-packages", "dist-packages"]
# Substrings of the file name that exclude a file
skip_file_keywords = ["test", "tests"]
max_snippet_lines = 80

# Replace the keyword list of any stage; unlisted stages keep their defaults.
[stages]
# exposure = ["exposure", "oed", "location", "expos"]
# hazard = ["hazard", "peril", "event", "occurrence"]
# gul = ["gul", "loss", "groundup", "damage"]
# fm = ["fm", "financial", "terms", "reinsurance", "profile"]
# aggregation = ["aggregation", "aggre", "summary", "report", "reports"]

[generation]
# repo_name = "OasisLMF"
seed = 42
n_qa = 200
n_design = 50
language = "zh"

[output]
catalog_dir = "data/intermediate"
dataset_dir = "data/final_datasets"
"#;

pub fn init_config(force: bool) -> Result<PathBuf> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, DocsynthConfig, GenerationConfig, OutputConfig, ScanConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.scan_settings(), ScanConfig::default());
        assert_eq!(config.generation_settings(), GenerationConfig::default());
        assert_eq!(config.output_settings(), OutputConfig::default());
        assert_eq!(
            config.build_classifier(),
            DocsynthConfig::default().build_classifier()
        );
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = init_config_in(dir.path(), false).unwrap();
        std::fs::write(&path, "# edited\n").unwrap();

        assert!(init_config_in(dir.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");

        init_config_in(dir.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[generation]"));
    }
}
