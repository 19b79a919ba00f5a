use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetSettings {
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: "data/titanic.csv".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub palette: Vec<String>,
    pub font: String,
    pub title_font_size: String,
    pub title_alignment: String,
    pub title_font_style: String,
    pub axis_label_size: String,
    pub axis_ticks_size: String,
    pub default_padding: u32,
    pub inner_padding: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            palette: ["#ba32a0", "#f85479", "#f8c260", "#00c2ba"]
                .into_iter()
                .map(String::from)
                .collect(),
            font: "Helvetica".to_string(),
            title_font_size: "16pt".to_string(),
            title_alignment: "center".to_string(),
            title_font_style: "bold italic".to_string(),
            axis_label_size: "14pt".to_string(),
            axis_ticks_size: "12pt".to_string(),
            default_padding: 30,
            inner_padding: 0.015,
        }
    }
}

/// `TITANIC_SERVER__PORT=9000` -> `server.port`
fn environment() -> config::Environment {
    config::Environment::with_prefix("TITANIC")
        .prefix_separator("_")
        .separator("__")
}

/// Layered config: `config/dashboard.*` (optional), then `TITANIC_*` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment())
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    if config.chart.palette.is_empty() {
        anyhow::bail!("chart.palette must contain at least one color");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_constants() {
        let config = DashboardConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dataset.path, "data/titanic.csv");
        assert_eq!(config.chart.palette.len(), 4);
        assert_eq!(config.chart.palette[1], "#f85479");
        assert_eq!(config.chart.inner_padding, 0.015);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[chart]\nfont = \"Georgia\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: DashboardConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chart.font, "Georgia");
        assert_eq!(config.chart.title_font_size, "16pt");
        assert_eq!(config.dataset.path, "data/titanic.csv");
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut vars = config::Map::new();
        vars.insert("TITANIC_SERVER__PORT".to_string(), "9001".to_string());
        vars.insert("TITANIC_DATASET__PATH".to_string(), "/srv/titanic.csv".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::from_str("[server]\nport = 9000\n", config::FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap();
        let config: DashboardConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.dataset.path, "/srv/titanic.csv");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
