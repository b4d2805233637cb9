//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::config_store::{self, CONFIG_FILE_NAME};
use crate::adapters::report_format::ReportFormat;
use crate::domain::config::StraterConfig;
use crate::domain::config_keys::{
    DEFAULT_KEYS, KEY_DESCRIPTION, KEY_MONTH_PROFIT_TARGET_PCT, KEY_MONTH_TRADES_NET_WINS,
    KEY_NAME, KEY_TRADE_REWARD_PCT, KEY_TRADE_RISK_PCT,
};
use crate::domain::error::StraterError;
use crate::domain::params::StrategyOverride;
use crate::domain::plan::Plan;
use crate::domain::projection::project;

#[derive(Parser, Debug)]
#[command(
    name = "strater",
    about = "A trading strategy scaling calculator",
    long_about = "Strater helps you plan and analyze account and risk management strategies."
)]
pub struct Cli {
    /// Override the configuration file location
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new configuration file with default values
    Init,
    /// Get or set default configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage trading strategies
    #[command(alias = "strategy")]
    Strat {
        #[command(subcommand)]
        action: StratAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List all available configuration keys
    List,
    /// Print a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum StratAction {
    /// List all strategies
    List,
    /// Add a new strategy
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove a strategy
    Remove { name: String },
    /// Get, set or unset a strategy configuration value
    Config {
        name: String,
        key: String,
        value: Option<String>,
        /// Clear the override so the value is inherited from the defaults
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },
    /// Show the effective parameters of a strategy
    Show { name: String },
    /// Project account growth for a strategy and write a report
    Analyze {
        name: String,
        /// Number of months to project (default from config)
        #[arg(short, long)]
        months: Option<u32>,
        /// Initial capital (default from config)
        #[arg(short, long)]
        capital: Option<f64>,
        /// Report format: csv, json, table or xlsx
        #[arg(short, long, default_value = "csv")]
        output: String,
        /// Output file path (default derived from config)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let file = cli.file.as_deref();
    let result = match cli.command {
        Command::Init => run_init(file),
        Command::Config { action } => run_config(file, action),
        Command::Strat { action } => run_strat(file, action),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_init(file: Option<&Path>) -> Result<(), StraterError> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => {
            if let Ok(existing) = config_store::find_config_file() {
                return Err(StraterError::ConfigParse {
                    file: existing.display().to_string(),
                    reason: "configuration file already exists".into(),
                });
            }
            PathBuf::from(CONFIG_FILE_NAME)
        }
    };
    config_store::init_at(&path)?;
    eprintln!("Created new configuration file: {}", path.display());
    Ok(())
}

fn load(file: Option<&Path>) -> Result<(PathBuf, StraterConfig), StraterError> {
    let path = config_store::resolve_config_path(file)?;
    let config = config_store::load(&path)?;
    Ok((path, config))
}

fn run_config(file: Option<&Path>, action: ConfigAction) -> Result<(), StraterError> {
    match action {
        ConfigAction::List => {
            for key in DEFAULT_KEYS {
                println!("{key}");
            }
            Ok(())
        }
        ConfigAction::Get { key } => {
            let (_, config) = load(file)?;
            println!("{}", config.get_default_value(&key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let (path, mut config) = load(file)?;
            config.set_default_value(&key, &value)?;
            config_store::save(&config, &path)
        }
    }
}

fn run_strat(file: Option<&Path>, action: StratAction) -> Result<(), StraterError> {
    match action {
        StratAction::List => {
            let (_, config) = load(file)?;
            print!("{}", format_strategy_list(&config));
            Ok(())
        }
        StratAction::Add { name, description } => {
            let (path, mut config) = load(file)?;
            config.add_strategy(StrategyOverride {
                description: description.unwrap_or_default(),
                ..StrategyOverride::new(name.trim())
            })?;
            config_store::save(&config, &path)?;
            eprintln!("Added strategy: {}", name.trim());
            Ok(())
        }
        StratAction::Remove { name } => {
            let (path, mut config) = load(file)?;
            config.remove_strategy(&name)?;
            config_store::save(&config, &path)?;
            eprintln!("Removed strategy: {name}");
            Ok(())
        }
        StratAction::Config {
            name,
            key,
            value,
            unset,
        } => {
            let (path, mut config) = load(file)?;
            if unset {
                config.unset_strategy_value(&name, &key)?;
                return config_store::save(&config, &path);
            }
            match value {
                Some(value) => {
                    config.set_strategy_value(&name, &key, &value)?;
                    config_store::save(&config, &path)
                }
                None => {
                    println!("{}", config.get_strategy_value(&name, &key)?);
                    Ok(())
                }
            }
        }
        StratAction::Show { name } => {
            let (_, config) = load(file)?;
            print!("{}", format_effective(&config, &name)?);
            Ok(())
        }
        StratAction::Analyze {
            name,
            months,
            capital,
            output,
            path,
        } => {
            let format: ReportFormat = output.parse()?;
            let (_, config) = load(file)?;
            run_analyze(config, &name, months, capital, format, path.as_deref())
        }
    }
}

/// `Available Strategies:` followed by one line per strategy, with the
/// profit target and risk shown when the strategy overrides them.
pub fn format_strategy_list(config: &StraterConfig) -> String {
    let mut output = String::from("Available Strategies:\n");
    for s in &config.strategies {
        output.push_str(&format!("- {}", s.name));
        if let Some(target) = s.month_profit_target_pct {
            output.push_str(&format!(" (Profit Target: {:.1}%)", target * 100.0));
        }
        if let Some(risk) = s.trade_risk_pct {
            output.push_str(&format!(" (Risk: {:.1}%)", risk * 100.0));
        }
        output.push('\n');
    }
    output
}

/// Effective parameters of one strategy, one `key: value` line each.
pub fn format_effective(config: &StraterConfig, name: &str) -> Result<String, StraterError> {
    let strategy = config.strategy(name)?;
    let p = config.effective_parameters(name)?;
    let mut output = String::new();
    output.push_str(&format!("{}: {}\n", KEY_NAME, strategy.name));
    output.push_str(&format!("{}: {}\n", KEY_DESCRIPTION, strategy.description));
    output.push_str(&format!("{}: {:.2}\n", KEY_TRADE_RISK_PCT, p.trade_risk_pct));
    output.push_str(&format!("{}: {:.2}\n", KEY_TRADE_REWARD_PCT, p.trade_reward_pct));
    output.push_str(&format!(
        "{}: {}\n",
        KEY_MONTH_TRADES_NET_WINS, p.month_trades_net_wins
    ));
    output.push_str(&format!(
        "{}: {:.2}\n",
        KEY_MONTH_PROFIT_TARGET_PCT, p.month_profit_target_pct
    ));
    Ok(output)
}

/// Report destination: an explicit path wins, then the configured output
/// directory, then the working directory.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    output_dir: Option<&str>,
    strategy_name: &str,
    format: ReportFormat,
) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let file_name = format!("{}_analysis.{}", strategy_name, format.extension());
    match output_dir {
        Some(dir) => Path::new(dir).join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Applies CLI overrides to a copy of the loaded configuration.
pub fn apply_capital_override(
    mut config: StraterConfig,
    capital: Option<f64>,
) -> Result<StraterConfig, StraterError> {
    if let Some(c) = capital {
        if !c.is_finite() || c < 0.0 {
            return Err(StraterError::invalid(
                "cli",
                "capital",
                "capital must be a non-negative number",
            ));
        }
        config.defaults.capital_start = c.trunc() as i64;
    }
    Ok(config)
}

pub fn run_analyze(
    config: StraterConfig,
    name: &str,
    months: Option<u32>,
    capital: Option<f64>,
    format: ReportFormat,
    explicit_path: Option<&Path>,
) -> Result<(), StraterError> {
    let config = apply_capital_override(config, capital)?;
    let months = months.unwrap_or(config.defaults.month_count);

    eprintln!("Analyzing strategy: {name} ({months} months)");
    let plan = project(name, months, &config)?;

    let output = resolve_output_path(
        explicit_path,
        config.settings.output_path.as_deref(),
        name,
        format,
    );
    format.writer().write_plan(&plan, &output)?;

    eprint!("{}", format_summary(&plan));
    eprintln!("\nReport written to: {}", output.display());
    Ok(())
}

pub fn format_summary(plan: &Plan) -> String {
    let mut output = format!("\n=== Projection: {} ===\n", plan.strategy_name);
    output.push_str(&format!("Months:           {}\n", plan.monthly_results.len()));
    output.push_str(&format!("Initial Capital:  {:.2}\n", plan.initial_capital));
    output.push_str(&format!("Final Balance:    {:.2}\n", plan.final_balance()));
    output.push_str(&format!("Total Profit:     {:.2}\n", plan.total_profit()));
    output.push_str(&format!("Total Return:     {:.2}%\n", plan.total_return() * 100.0));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "strater", "-f", "cfg.ini", "strat", "analyze", "ifunds", "-m", "6", "-c", "5000",
            "-o", "json", "-p", "out.json",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("cfg.ini")));
        match cli.command {
            Command::Strat {
                action:
                    StratAction::Analyze {
                        name,
                        months,
                        capital,
                        output,
                        path,
                    },
            } => {
                assert_eq!(name, "ifunds");
                assert_eq!(months, Some(6));
                assert_eq!(capital, Some(5000.0));
                assert_eq!(output, "json");
                assert_eq!(path, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn analyze_defaults_to_csv() {
        let cli = Cli::try_parse_from(["strater", "strategy", "analyze", "x"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Strat {
                action: StratAction::Analyze {
                    ref output,
                    months: None,
                    capital: None,
                    ..
                }
            } if output == "csv"
        ));
    }

    #[test]
    fn unset_conflicts_with_value() {
        let result = Cli::try_parse_from([
            "strater", "strat", "config", "x", "trade_reward_pct", "0.1", "--unset",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_exits_with_report_code() {
        let cli =
            Cli::try_parse_from(["strater", "strat", "analyze", "x", "-o", "pdf"]).unwrap();
        assert_eq!(run(cli), ExitCode::from(4));
    }

    #[test]
    fn output_path_resolution() {
        assert_eq!(
            resolve_output_path(Some(Path::new("x.csv")), Some("dir"), "s", ReportFormat::Csv),
            PathBuf::from("x.csv")
        );
        assert_eq!(
            resolve_output_path(None, Some("dir"), "s", ReportFormat::Json),
            Path::new("dir").join("s_analysis.json")
        );
        assert_eq!(
            resolve_output_path(None, None, "s", ReportFormat::Table),
            PathBuf::from("s_analysis.txt")
        );
    }

    #[test]
    fn capital_override() {
        let config = apply_capital_override(StraterConfig::default(), Some(2500.9)).unwrap();
        assert_eq!(config.defaults.capital_start, 2500);

        let untouched = apply_capital_override(StraterConfig::default(), None).unwrap();
        assert_eq!(untouched.defaults.capital_start, 10_000);

        assert!(apply_capital_override(StraterConfig::default(), Some(-1.0)).is_err());
    }

    #[test]
    fn strategy_list_shows_overrides() {
        let mut config = StraterConfig::default();
        config
            .add_strategy(StrategyOverride {
                month_profit_target_pct: Some(0.2),
                trade_risk_pct: Some(0.02),
                ..StrategyOverride::new("bold")
            })
            .unwrap();
        config.add_strategy(StrategyOverride::new("plain")).unwrap();
        assert_eq!(
            format_strategy_list(&config),
            "Available Strategies:\n- bold (Profit Target: 20.0%) (Risk: 2.0%)\n- plain\n"
        );
    }

    #[test]
    fn effective_listing() {
        let mut config = StraterConfig::default();
        config
            .add_strategy(StrategyOverride {
                description: "test".into(),
                trade_reward_pct: Some(0.02),
                ..StrategyOverride::new("s")
            })
            .unwrap();
        assert_eq!(
            format_effective(&config, "s").unwrap(),
            "name: s\ndescription: test\ntrade_risk_pct: 0.01\ntrade_reward_pct: 0.02\n\
             month_trades_net_wins: 10\nmonth_profit_target_pct: 0.10\n"
        );
        assert!(format_effective(&config, "missing").is_err());
    }
}
