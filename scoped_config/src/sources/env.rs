//! Snapshot of environment variables.
//!
//! Reading goes through `figment::providers::Env` so key filtering matches
//! the rest of the figment ecosystem. Values stay raw text; parsing belongs
//! to each leaf's `envVarParser`.

use std::collections::BTreeMap;

use figment::providers::Env;

/// Flat map of environment variable names to raw values.
///
/// # Examples
///
/// ```
/// use scoped_config::Environment;
///
/// let env = Environment::new().with_var("PROTOCOL", "wss");
/// assert_eq!(env.get("PROTOCOL"), Some("wss"));
/// assert_eq!(env.get("protocol"), None);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment with names kept case-sensitive.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        Env::raw()
            .lowercase(false)
            .iter()
            .map(|(name, value)| (name.as_str().to_owned(), value))
            .collect()
    }

    /// Return the environment with `name` set to `value`.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Raw value of `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::Environment;
    use crate::test_support::with_jail;

    #[rstest]
    #[case("SC_TEST_PROTOCOL", "wss")]
    #[case("Mixed_Case_Name", "a,b,c")]
    fn snapshot_preserves_names_and_raw_values(
        #[case] name: &str,
        #[case] value: &str,
    ) -> Result<()> {
        with_jail(|j| {
            j.set_env(name, value);
            let env = Environment::from_process();
            ensure!(
                env.get(name) == Some(value),
                "expected {name}={value:?}, got {:?}",
                env.get(name)
            );
            Ok(())
        })
    }

    #[rstest]
    fn builder_and_collect_agree() {
        let built = Environment::new().with_var("A", "1").with_var("B", "2");
        let collected: Environment = [("B", "2"), ("A", "1")].into_iter().collect();
        assert_eq!(built, collected);
        assert_eq!(built.len(), 2);
    }
}
