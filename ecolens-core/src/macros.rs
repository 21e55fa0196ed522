//! Logging shorthands used across the engines.

macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

pub(crate) use {log_debug, log_info, log_warn};
