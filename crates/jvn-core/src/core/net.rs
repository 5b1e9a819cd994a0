use crate::config::EnvSnapshot;

const PROXY_KEYS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Decide whether jvn should honor standard proxy environment variables.
///
/// Behavior:
/// - `JVN_KEEP_PROXIES=1/true/yes/on` forces proxies on.
/// - `JVN_KEEP_PROXIES=0/false/no/off/""` forces proxies off.
/// - If unset, proxies are enabled only when at least one proxy env var is set.
pub(crate) fn keep_proxies(env: &EnvSnapshot) -> bool {
    match env.var("JVN_KEEP_PROXIES") {
        Some(raw) => {
            let value = raw.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        None => PROXY_KEYS.iter().any(|key| env.non_empty(key).is_some()),
    }
}
