use serde::{Deserialize, Serialize};

/// Script the widget configuration is handed to.
pub const EMBED_SCRIPT_SRC: &str =
    "https://s3.tradingview.com/external-embedding/embed-widget-advanced-chart.js";

/// Static configuration of the embedded advanced-chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub autosize: bool,
    pub symbol: String,
    pub interval: String,
    pub timezone: String,
    pub theme: String,
    pub style: String,
    pub locale: String,
    pub hide_side_toolbar: bool,
    pub allow_symbol_change: bool,
    pub support_host: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            autosize: true,
            symbol: "PYTH:SOLUSD".to_string(),
            interval: "1".to_string(),
            timezone: "Etc/UTC".to_string(),
            theme: "dark".to_string(),
            style: "1".to_string(),
            locale: "en".to_string(),
            hide_side_toolbar: false,
            allow_symbol_change: false,
            support_host: "https://www.tradingview.com".to_string(),
        }
    }
}

impl ChartConfig {
    /// The `<script>` element that instantiates the widget once.
    pub fn embed_snippet(&self) -> serde_json::Result<String> {
        Ok(format!(
            "<script type=\"text/javascript\" src=\"{}\" async>\n{}\n</script>",
            EMBED_SCRIPT_SRC,
            serde_json::to_string_pretty(self)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_carries_symbol_and_theme() {
        let snippet = ChartConfig::default().embed_snippet().unwrap();
        assert!(snippet.starts_with("<script"));
        assert!(snippet.contains(EMBED_SCRIPT_SRC));
        assert!(snippet.contains("\"symbol\": \"PYTH:SOLUSD\""));
        assert!(snippet.contains("\"theme\": \"dark\""));
    }
}
