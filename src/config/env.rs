use toml::Value;

use super::source::{ConfigLayer, LayerEntry};
use super::ConfigError;

/// A configuration layer read from environment variables.
///
/// `PREFIX<sep>DB<sep>PORT=5432` becomes `db.port = 5432`. Segments are
/// lowercased and values are coerced to bool, integer, float or string.
#[derive(Debug, Clone)]
pub struct EnvLayer {
    prefix: String,
    separator: String,
}

impl EnvLayer {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }

    fn entries_from<I>(&self, vars: I) -> Vec<LayerEntry>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if self.separator.is_empty() {
            tracing::warn!(prefix = %self.prefix, "empty env separator, ignoring environment layer");
            return Vec::new();
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        vars.into_iter()
            .filter_map(|(key, value)| {
                let rest = key.strip_prefix(&prefix_with_sep)?;
                if rest.is_empty() {
                    return None;
                }
                let path = rest
                    .split(self.separator.as_str())
                    .map(str::to_lowercase)
                    .collect();
                Some(LayerEntry::at_path(path, coerce_value(&value)))
            })
            .collect()
    }
}

impl ConfigLayer for EnvLayer {
    fn entries(&self) -> Result<Vec<LayerEntry>, ConfigError> {
        let entries = self.entries_from(std::env::vars());
        tracing::debug!(prefix = %self.prefix, count = entries.len(), "loaded environment overrides");
        Ok(entries)
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_maps_segments_to_path() {
        let layer = EnvLayer::new("APP", "__");
        let entries = layer.entries_from(vars(&[
            ("APP__DB__HOST", "db.internal"),
            ("OTHER__DB__HOST", "ignored"),
            ("APP__", "ignored"),
        ]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, ["db", "host"]);
        assert_eq!(entries[0].value.as_str(), Some("db.internal"));
    }

    #[test]
    fn test_env_value_coercion() {
        assert_eq!(coerce_value("TRUE"), Value::Boolean(true));
        assert_eq!(coerce_value("false"), Value::Boolean(false));
        assert_eq!(coerce_value("-42"), Value::Integer(-42));
        assert_eq!(coerce_value("1.5"), Value::Float(1.5));
        assert_eq!(coerce_value("8.8.8.8"), Value::String("8.8.8.8".into()));
        assert_eq!(coerce_value("-"), Value::String("-".into()));
    }

    #[test]
    fn test_env_empty_separator_yields_nothing() {
        let layer = EnvLayer::new("APP", "");
        assert!(layer.entries_from(vars(&[("APPX", "1")])).is_empty());
    }
}
