use bundlecfg_config::Mode;
use clap::ValueEnum;

/// Build mode selected on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ModeArg {
    /// Debug-friendly build with loader source maps
    #[value(name = "development", alias = "dev")]
    Development,

    /// Optimized build without loader source maps
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}

/// Rendition printed by `show`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum ShowFormat {
    /// JSON object with paths resolved against the config directory
    #[default]
    #[value(name = "json")]
    Json,

    /// CommonJS module (`module.exports = { ... }`)
    #[value(name = "js")]
    Js,

    /// bundlecfg.toml document
    #[value(name = "toml")]
    Toml,
}
