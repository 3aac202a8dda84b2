use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

static CONFIG: OnceLock<GitfitConfig> = OnceLock::new();

/// Heatmap palette, least to most active.
const DEFAULT_LEVEL_COLORS: [(u8, u8, u8); 5] = [
    (0x1F, 0x29, 0x37),
    (0x4A, 0xDE, 0x80),
    (0x22, 0xC5, 0x5E),
    (0x16, 0xA3, 0x4A),
    (0x15, 0x80, 0x3D),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitfitConfig {
    #[serde(default)]
    pub colors: ColorsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorsConfig {
    pub level0: Option<String>,
    pub level1: Option<String>,
    pub level2: Option<String>,
    pub level3: Option<String>,
    pub level4: Option<String>,
}

impl GitfitConfig {
    fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gitfit"))
    }

    pub fn load() -> &'static GitfitConfig {
        CONFIG.get_or_init(|| {
            Self::config_path()
                .and_then(|path| fs::read_to_string(path).ok())
                .and_then(|content| match toml::from_str(&content) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring invalid ~/.gitfit");
                        None
                    }
                })
                .unwrap_or_default()
        })
    }

    /// RGB for an intensity level; levels above 4 use the level 4 colour.
    pub fn level_color(&self, level: u8) -> (u8, u8, u8) {
        let index = usize::from(level.min(4));
        let configured = match index {
            0 => &self.colors.level0,
            1 => &self.colors.level1,
            2 => &self.colors.level2,
            3 => &self.colors.level3,
            _ => &self.colors.level4,
        };
        configured
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_LEVEL_COLORS[index])
    }
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
