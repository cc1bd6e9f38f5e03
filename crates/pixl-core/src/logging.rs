#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! and at the crate root. Without it, no-op macros with the same names keep
//! call sites compiling and cost nothing.
//!
//! The `tracing-json` feature adds [`LogConfig`] and [`init`], which install a
//! `tracing-subscriber` formatter filtered by `PIXL_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op error_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op info_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op trace_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op warn_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// A no-op span for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    /// Consume and enter the no-op span (does nothing).
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

#[cfg(feature = "tracing-json")]
pub use subscriber::{LogConfig, LogInitError, init};

#[cfg(feature = "tracing-json")]
mod subscriber {
    use std::fmt;

    use tracing_subscriber::EnvFilter;

    /// Environment variable holding the filter directive.
    pub const FILTER_ENV: &str = "PIXL_LOG";
    /// Environment variable selecting the output format (`json` or `text`).
    pub const FORMAT_ENV: &str = "PIXL_LOG_FORMAT";

    /// Subscriber configuration.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LogConfig {
        /// `EnvFilter` directive, e.g. `"pixl_compose=trace,info"`. Default: `"info"`.
        pub filter: String,
        /// Emit one JSON object per event. Default: false.
        pub json: bool,
        /// Include the event target (module path). Default: true.
        pub with_target: bool,
    }

    impl Default for LogConfig {
        fn default() -> Self {
            Self {
                filter: "info".to_owned(),
                json: false,
                with_target: true,
            }
        }
    }

    impl LogConfig {
        /// Read `PIXL_LOG` and `PIXL_LOG_FORMAT`, falling back to defaults.
        pub fn from_env() -> Self {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
            let mut config = Self::default();
            if let Some(filter) = lookup(FILTER_ENV).filter(|f| !f.trim().is_empty()) {
                config.filter = filter;
            }
            if let Some(format) = lookup(FORMAT_ENV) {
                config.json = format.trim().eq_ignore_ascii_case("json");
            }
            config
        }

        #[must_use]
        pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
            self.filter = filter.into();
            self
        }

        #[must_use]
        pub fn with_json(mut self, json: bool) -> Self {
            self.json = json;
            self
        }

        #[must_use]
        pub fn with_target(mut self, with_target: bool) -> Self {
            self.with_target = with_target;
            self
        }
    }

    /// Subscriber installation failure.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogInitError {
        /// The filter directive did not parse.
        InvalidFilter(String),
        /// A global subscriber was already set.
        AlreadyInitialized(String),
    }

    impl fmt::Display for LogInitError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
                Self::AlreadyInitialized(msg) => write!(f, "subscriber already set: {msg}"),
            }
        }
    }

    impl std::error::Error for LogInitError {}

    /// Install the global subscriber described by `config`.
    pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
        let filter = EnvFilter::try_new(&config.filter)
            .map_err(|err| LogInitError::InvalidFilter(err.to_string()))?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target);
        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|err| LogInitError::AlreadyInitialized(err.to_string()))
    }

}
