use std::path::PathBuf;

const EPGSTATION_HOST: &str = "EPGSTATION_HOST";

const DEFAULT_HOST: &str = "localhost";

pub fn get_default_host() -> String {
    std::env::var(EPGSTATION_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

const EPGSTATION_PORT: &str = "EPGSTATION_PORT";

const DEFAULT_PORT: u16 = 8888;

pub fn get_default_port() -> u16 {
    let port_from_env = std::env::var(EPGSTATION_PORT);
    port_from_env.map_or(DEFAULT_PORT, |res| res.parse().unwrap_or(DEFAULT_PORT))
}

const PLUGIN_WORKDIR: &str = "MACKEREL_PLUGIN_WORKDIR";

/// Directory the last-value tempfile lives in when no explicit path is given.
pub fn get_workdir() -> PathBuf {
    std::env::var_os(PLUGIN_WORKDIR)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

const PLUGIN_META: &str = "MACKEREL_AGENT_PLUGIN_META";

/// The agent sets this (to any non-empty value) when it wants graph definitions instead of values.
pub fn is_meta_request() -> bool {
    meta_requested(std::env::var(PLUGIN_META).ok().as_deref())
}

fn meta_requested(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}
