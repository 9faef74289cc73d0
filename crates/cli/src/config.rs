use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use sync_update::demo::{self, Options, DEFAULT_TOTAL_PROGRESS};

use crate::report::{ErrorExt, Report};
use crate::Demo;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    total_progress: Option<u32>,
    tick_ms: Option<u64>,
    element: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub element: String,
    pub options: Options,
}

/// Command line flags win over the config file, which wins over defaults.
pub fn config(path: Option<&Path>, demo: &Demo) -> Report<Config> {
    let file = match path {
        Some(path) => read(path)?,
        None => ConfigFile::default(),
    };

    Ok(resolve(file, demo))
}

fn read(path: &Path) -> Report<ConfigFile> {
    let bytes =
        fs::read(path).with_message(|| format!("failed to read config file {}", path.display()))?;

    serde_json::from_slice(&bytes)
        .with_message(|| format!("failed to parse config file {}", path.display()))
}

fn resolve(file: ConfigFile, demo: &Demo) -> Config {
    let tick_ms = demo.tick_ms.or(file.tick_ms).unwrap_or(1);

    Config {
        element: demo
            .element
            .clone()
            .or(file.element)
            .unwrap_or_else(|| demo::NAME.to_owned()),
        options: Options {
            total_progress: demo
                .total
                .or(file.total_progress)
                .unwrap_or(DEFAULT_TOTAL_PROGRESS),
            tick: Duration::from_millis(tick_ms),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(total: Option<u32>, element: Option<&str>) -> Demo {
        Demo {
            total,
            tick_ms: None,
            element: element.map(str::to_owned),
        }
    }

    #[test]
    fn defaults() {
        let config = resolve(ConfigFile::default(), &flags(None, None));

        assert_eq!(config.element, "sync-updating-example");
        assert_eq!(config.options, Options::default());
    }

    #[test]
    fn file_then_flags() {
        let file: ConfigFile =
            serde_json::from_str(r#"{ "totalProgress": 250, "tickMs": 4, "element": "my-demo" }"#)
                .unwrap();
        let config = resolve(file, &flags(Some(10), None));

        assert_eq!(config.element, "my-demo");
        assert_eq!(config.options.total_progress, 10);
        assert_eq!(config.options.tick, Duration::from_millis(4));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_str::<ConfigFile>(r#"{ "total": 5 }"#);

        assert!(res.is_err());
    }

    #[test]
    fn missing_file() {
        let err = config(Some(Path::new("/nonexistent/sync-update.json")), &flags(None, None))
            .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("failed to read config file /nonexistent/sync-update.json"));
    }
}
