//! Deploy-config file loading.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Format, Json};
#[cfg(feature = "toml")]
use figment::providers::Toml;
use serde_json::Value;

use crate::error::{file_invalid_data, file_not_found};
use crate::{ConfigError, ConfigResult};

/// Read the deploy-config at `path` into a value tree.
///
/// `.json` files are parsed as JSON; everything else is parsed as TOML
/// (requires the `toml` feature). The document must be an object.
///
/// # Errors
///
/// Returns [`ConfigError::File`] when the file is missing, unreadable, not
/// parseable, or not an object, and [`ConfigError::Gathering`] when figment
/// cannot extract the parsed data.
pub fn load_deploy_config(path: &Utf8Path) -> ConfigResult<Value> {
    if !path.is_file() {
        return Err(file_not_found(
            path.as_std_path(),
            "deploy-config file does not exist",
        ));
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::file(path.as_std_path(), e))?;
    let figment = parse_by_format(path, &data)?;
    let value: Value = figment.extract().map_err(ConfigError::gathering)?;
    tracing::debug!(path = %path, "loaded deploy-config");
    Ok(value)
}

fn parse_by_format(path: &Utf8Path, data: &str) -> ConfigResult<Figment> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    if ext.as_deref() == Some("json") {
        // Report syntax errors against the file before figment sees the data.
        let parsed = serde_json::from_str::<Value>(data)
            .map_err(|e| ConfigError::file(path.as_std_path(), e))?;
        if !parsed.is_object() {
            return Err(file_invalid_data(
                path.as_std_path(),
                "deploy-config must contain an object at the top level",
            ));
        }
        return Ok(Figment::from(Json::string(data)));
    }
    #[cfg(feature = "toml")]
    {
        toml::from_str::<toml::Value>(data)
            .map_err(|e| ConfigError::file(path.as_std_path(), e))?;
        Ok(Figment::from(Toml::string(data)))
    }
    #[cfg(not(feature = "toml"))]
    {
        Err(ConfigError::file(
            path.as_std_path(),
            std::io::Error::other(
                "toml feature disabled: enable the 'toml' feature to support this file format",
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use camino::Utf8Path;
    use rstest::rstest;
    use serde_json::json;

    use super::load_deploy_config;
    use crate::ConfigError;
    use crate::test_support::with_jail;

    #[rstest]
    #[case("deploy.json", r#"{"server": {"port": 9000, "tags": ["a", "b"]}}"#)]
    #[case("deploy.toml", "[server]\nport = 9000\ntags = [\"a\", \"b\"]\n")]
    fn loads_nested_trees(#[case] name: &str, #[case] contents: &str) -> Result<()> {
        with_jail(|j| {
            j.create_file(name, contents)?;
            let value = load_deploy_config(Utf8Path::new(name)).map_err(|e| anyhow!(e))?;
            ensure!(
                value == json!({"server": {"port": 9000, "tags": ["a", "b"]}}),
                "unexpected tree {value}"
            );
            Ok(())
        })
    }

    #[rstest]
    fn missing_file_is_reported() {
        let err = load_deploy_config(Utf8Path::new("definitely/not/here.json"))
            .expect_err("missing file must fail");
        assert!(matches!(&*err, ConfigError::File { .. }), "got {err:?}");
    }

    #[rstest]
    #[case("broken.json", "{ not json")]
    #[case("broken.toml", "port = = 1")]
    fn syntax_errors_name_the_file(#[case] name: &str, #[case] contents: &str) -> Result<()> {
        with_jail(|j| {
            j.create_file(name, contents)?;
            let err = load_deploy_config(Utf8Path::new(name))
                .err()
                .ok_or_else(|| anyhow!("expected {name} to fail"))?;
            ensure!(
                matches!(&*err, ConfigError::File { path, .. } if path.ends_with(name)),
                "unexpected error {err:?}"
            );
            Ok(())
        })
    }
}
