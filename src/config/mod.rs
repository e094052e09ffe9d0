mod application_settings;
mod logging;

pub use application_settings::{
    ApplicationSettings, ConfigError, DatabaseSettings, JwtSettings, ServerSettings,
};
pub use logging::init_logging;
