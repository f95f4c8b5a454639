use crate::error::Error;
use crate::table::{Pair, Pass, SubstitutionPlan, SubstitutionTable};
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "tradfix.toml";
pub const CONFIG_ENV: &str = "TRADFIX_CONFIG";

/// On-disk configuration. Pairs are arrays of tables so their order survives
/// parsing.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub documents: Vec<PathBuf>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub use_default_table: bool,
    #[serde(default)]
    pub pre_corrections: Vec<Pair>,
    #[serde(default)]
    pub replacements: Vec<Pair>,
}

fn default_table() -> Vec<Pair> {
    [("学习", "學習"), ("习", "習")]
        .into_iter()
        .map(|(k, v)| Pair::new(k, v))
        .collect()
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let mut config: Config = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        // User pairs override built-in pairs with the same pattern
        if config.use_default_table {
            let mut pairs: Vec<Pair> = default_table()
                .into_iter()
                .filter(|d| !config.replacements.iter().any(|p| p.from == d.from))
                .collect();
            pairs.append(&mut config.replacements);
            config.replacements = pairs;
        }
        Ok(config)
    }

    pub fn plan(&self) -> Result<SubstitutionPlan, Error> {
        let pre_corrections =
            SubstitutionTable::new(self.pre_corrections.clone()).map_err(|source| {
                Error::Table {
                    pass: Pass::PreCorrection,
                    source,
                }
            })?;
        let main = SubstitutionTable::new(self.replacements.clone())
            .map_err(|source| Error::Table {
                pass: Pass::Main,
                source,
            })?;
        debug!(
            "plan: {} pre-correction pairs, {} main pairs",
            pre_corrections.len(),
            main.len()
        );
        Ok(SubstitutionPlan::new(pre_corrections, main))
    }
}

/// Candidate config locations in lookup order: the explicit path, else the
/// environment override, else the working directory then the user config dir.
fn config_paths(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return vec![path];
    }
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = config_dir {
        paths.push(dir.join(CONFIG_FILE));
    }
    paths
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, Error> {
    let tried = config_paths(
        explicit,
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        dirs::config_dir(),
    );
    let Some(path) = tried.iter().find(|p| p.is_file()) else {
        return Err(Error::ConfigNotFound { tried });
    };
    info!("using config {path:?}");
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;
    Config::parse(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use tempfile::tempdir;

    fn parse(content: &str) -> Config {
        Config::parse(content, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_keeps_pair_order() {
        let config = parse(
            r#"
documents = ["a.md", "b.md"]
strict = true

[[pre_corrections]]
from = "學習習"
to = "學習"

[[replacements]]
from = "学习"
to = "學習"

[[replacements]]
from = "习"
to = "習"
"#,
        );
        assert_eq!(
            config.documents,
            vec![PathBuf::from("a.md"), PathBuf::from("b.md")]
        );
        assert!(config.strict);
        let plan = config.plan().unwrap();
        assert_eq!(plan.pre_corrections.len(), 1);
        assert_eq!(plan.main.patterns().collect::<Vec<_>>(), vec!["学习", "习"]);
    }

    #[test]
    fn test_inline_pairs() {
        let config = parse(r#"replacements = [{ from = "这", to = "這" }]"#);
        assert_eq!(config.replacements, vec![Pair::new("这", "這")]);
        assert!(!config.strict);
        assert!(config.documents.is_empty());
    }

    #[test]
    fn test_duplicate_pattern_is_config_error() {
        let config = parse(
            r#"
replacements = [
    { from = "么", to = "麼" },
    { from = "么", to = "麽" },
]
"#,
        );
        let err = config.plan().unwrap_err();
        assert!(matches!(
            err,
            Error::Table {
                pass: Pass::Main,
                source: TableError::DuplicatePattern { first: 0, second: 1, .. },
            }
        ));
    }

    #[test]
    fn test_default_table_prepended() {
        let config = parse(
            r#"
use_default_table = true
replacements = [{ from = "进步", to = "進步" }, { from = "习", to = "习" }]
"#,
        );
        assert_eq!(
            config.replacements,
            vec![
                Pair::new("学习", "學習"),
                Pair::new("进步", "進步"),
                Pair::new("习", "习"),
            ]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::parse("replacement = []", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_path_beats_env() {
        let paths = config_paths(
            Some(Path::new("cli.toml")),
            Some(PathBuf::from("env.toml")),
            Some(PathBuf::from("/home/u/.config")),
        );
        assert_eq!(paths, vec![PathBuf::from("cli.toml")]);
    }

    #[test]
    fn test_env_beats_defaults() {
        let paths = config_paths(
            None,
            Some(PathBuf::from("env.toml")),
            Some(PathBuf::from("/home/u/.config")),
        );
        assert_eq!(paths, vec![PathBuf::from("env.toml")]);
    }

    #[test]
    fn test_default_lookup_order() {
        let paths = config_paths(None, None, Some(PathBuf::from("/home/u/.config")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("tradfix.toml"),
                PathBuf::from("/home/u/.config/tradfix.toml"),
            ]
        );

        // empty env value counts as unset
        let paths = config_paths(None, Some(PathBuf::new()), None);
        assert_eq!(paths, vec![PathBuf::from("tradfix.toml")]);
    }

    #[test]
    fn test_table_error_names_pass() {
        let config = parse(r#"pre_corrections = [{ from = "", to = "x" }]"#);
        let err = config.plan().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid pre-correction table: pair #0 has an empty pattern"
        );
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "documents = [\"x.txt\"]\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.documents, vec![PathBuf::from("x.txt")]);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_config(Some(&path)).unwrap_err();
        match err {
            Error::ConfigNotFound { tried } => assert_eq!(tried, vec![path]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
