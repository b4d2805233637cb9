//! INI file configuration adapter.
//!
//! Section and key names are case-sensitive so strategy names survive a
//! load/save cycle unchanged. Only whole-line comments are recognised; `#`
//! and `;` inside a value are kept.

use crate::domain::config::StraterConfig;
use crate::domain::config_keys::*;
use crate::ports::config_port::ConfigPort;
use configparser::ini::{Ini, IniDefault};
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

fn new_ini() -> Ini {
    let mut defaults = IniDefault::default();
    defaults.case_sensitive = true;
    defaults.inline_comment_symbols = Some(Vec::new());
    Ini::new_from_defaults(defaults)
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = new_ini();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = new_ini();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Builds the INI representation of a configuration record.
    ///
    /// Unset strategy fields are omitted. Every strategy section carries a
    /// `description` key so that it exists even with no overrides.
    pub fn from_config(cfg: &StraterConfig) -> Self {
        let mut config = new_ini();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set(
            SECTION_SETTINGS,
            KEY_OUTPUT_PATH,
            cfg.settings.output_path.clone().unwrap_or_default(),
        );

        let d = &cfg.defaults;
        set(SECTION_DEFAULTS, KEY_CAPITAL_START, d.capital_start.to_string());
        set(SECTION_DEFAULTS, KEY_MONTH_COUNT, d.month_count.to_string());
        set_opt(&mut set, SECTION_DEFAULTS, KEY_TRADE_RISK_PCT, d.trade_risk_pct);
        set_opt(&mut set, SECTION_DEFAULTS, KEY_TRADE_REWARD_PCT, d.trade_reward_pct);
        set_opt(
            &mut set,
            SECTION_DEFAULTS,
            KEY_MONTH_TRADES_NET_WINS,
            d.month_trades_net_wins,
        );
        set_opt(
            &mut set,
            SECTION_DEFAULTS,
            KEY_MONTH_PROFIT_TARGET_PCT,
            d.month_profit_target_pct,
        );

        for s in &cfg.strategies {
            let section = strategy_section(&s.name);
            set(&section, KEY_DESCRIPTION, s.description.clone());
            set_opt(&mut set, &section, KEY_TRADE_RISK_PCT, s.trade_risk_pct);
            set_opt(&mut set, &section, KEY_TRADE_REWARD_PCT, s.trade_reward_pct);
            set_opt(
                &mut set,
                &section,
                KEY_MONTH_TRADES_NET_WINS,
                s.month_trades_net_wins,
            );
            set_opt(
                &mut set,
                &section,
                KEY_MONTH_PROFIT_TARGET_PCT,
                s.month_profit_target_pct,
            );
        }

        Self { config }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        self.config.write(path)
    }

    pub fn to_ini_string(&self) -> String {
        self.config.writes()
    }
}

fn set_opt<T: ToString>(
    set: &mut impl FnMut(&str, &str, String),
    section: &str,
    key: &str,
    value: Option<T>,
) {
    if let Some(v) = value {
        set(section, key, v.to_string());
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn sections(&self) -> Vec<String> {
        self.config.sections()
    }
}
