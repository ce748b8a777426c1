//! URL Splitting
//!
//! Lenient hostname/path split used by the extractor.
//! Follows generic URI syntax (scheme, `//authority`, path, `;params`,
//! `?query`, `#fragment`) without validating or normalizing anything, so
//! lengths match what the training pipeline measured.

use std::borrow::Cow;
use std::net::Ipv6Addr;

/// Schemes whose last path segment may carry `;params`
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// Hostname and path derived from a raw URL string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub hostname: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("Invalid IPv6 URL: unbalanced brackets in authority")]
    UnbalancedBrackets,
    #[error("Invalid IPv6 URL: bracketed host '{0}' is not an IPv6 literal")]
    BadBracketedHost(String),
}

impl ParsedUrl {
    /// Split `url` into hostname and path.
    ///
    /// Inputs not starting with `http` get an `http://` prefix first so that
    /// `example.com/page` still yields a hostname. Never fails: a malformed
    /// authority degrades to an empty hostname with the raw URL as path.
    pub fn parse(url: &str) -> Self {
        let target: Cow<'_, str> = if url.starts_with("http") {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("http://{}", url))
        };

        match split(&target) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("URL split failed ({}), using raw input as path", e);
                Self {
                    hostname: String::new(),
                    path: url.to_string(),
                }
            }
        }
    }
}

/// Strict split; errors only on a malformed bracketed authority
pub fn split(url: &str) -> Result<ParsedUrl, SplitError> {
    let cleaned: String = url
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (scheme, rest) = split_scheme(&cleaned);

    let (netloc, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            after.split_at(end)
        }
        None => ("", rest),
    };

    check_brackets(netloc)?;

    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let mut path = &rest[..end];

    if PARAM_SCHEMES.contains(&scheme.as_str()) {
        path = strip_params(path);
    }

    Ok(ParsedUrl {
        hostname: hostname_of(netloc),
        path: path.to_string(),
    })
}

/// Scheme is `[A-Za-z][A-Za-z0-9+.-]*` before the first `:`; returned lower cased
fn split_scheme(url: &str) -> (String, &str) {
    let Some(colon) = url.find(':') else {
        return (String::new(), url);
    };

    let candidate = &url[..colon];
    let valid = candidate
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if valid {
        (candidate.to_ascii_lowercase(), &url[colon + 1..])
    } else {
        (String::new(), url)
    }
}

fn check_brackets(netloc: &str) -> Result<(), SplitError> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(SplitError::UnbalancedBrackets);
    }
    if !open {
        return Ok(());
    }

    let bracketed = netloc
        .split_once('[')
        .map(|(_, after)| after)
        .and_then(|after| after.split_once(']'))
        .map(|(host, _)| host)
        .unwrap_or("");

    if is_bracketed_host(bracketed) {
        Ok(())
    } else {
        Err(SplitError::BadBracketedHost(bracketed.to_string()))
    }
}

/// IPv6 literal (optionally with `%zone`) or IPvFuture `v<hex>.<anything>`
fn is_bracketed_host(host: &str) -> bool {
    if let Some(future) = host.strip_prefix('v') {
        return match future.split_once('.') {
            Some((version, tail)) => {
                !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_hexdigit())
                    && !tail.is_empty()
            }
            None => false,
        };
    }

    let address = host.split_once('%').map(|(addr, _)| addr).unwrap_or(host);
    address.parse::<Ipv6Addr>().is_ok()
}

/// Drop `;params` from the last path segment
fn strip_params(path: &str) -> &str {
    let search_from = path.rfind('/').unwrap_or(0);
    match path[search_from..].find(';') {
        Some(offset) => &path[..search_from + offset],
        None => path,
    }
}

/// Authority minus userinfo and port, brackets unwrapped, lower cased
fn hostname_of(netloc: &str) -> String {
    let hostinfo = netloc.rsplit_once('@').map(|(_, host)| host).unwrap_or(netloc);

    let host = match hostinfo.split_once('[') {
        Some((_, bracketed)) => bracketed.split_once(']').map(|(h, _)| h).unwrap_or(bracketed),
        None => hostinfo.split_once(':').map(|(h, _)| h).unwrap_or(hostinfo),
    };

    // Zone identifiers keep their case
    match host.split_once('%') {
        Some((addr, zone)) => format!("{}%{}", addr.to_lowercase(), zone),
        None => host.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str) -> (String, String) {
        let p = ParsedUrl::parse(url);
        (p.hostname, p.path)
    }

    #[test]
    fn test_full_url() {
        let (host, path) = parsed("https://www.Example.com:8443/a/b.html?q=1#top");
        assert_eq!(host, "www.example.com");
        assert_eq!(path, "/a/b.html");
    }

    #[test]
    fn test_scheme_less_input_gets_prefix() {
        assert_eq!(parsed("example.com/page"), ("example.com".into(), "/page".into()));
        assert_eq!(parsed("example.com"), ("example.com".into(), "".into()));
    }

    #[test]
    fn test_http_prefixed_word_without_authority() {
        // Starts with "http" so no prefix is added, and there is no "//"
        assert_eq!(parsed("httpfoo.com/login"), ("".into(), "httpfoo.com/login".into()));
    }

    #[test]
    fn test_userinfo_and_port_removed() {
        let (host, _) = parsed("http://user:pw@Bank.example.com:80/x");
        assert_eq!(host, "bank.example.com");
    }

    #[test]
    fn test_params_stripped_from_last_segment() {
        assert_eq!(parsed("http://a.com/x;y/z;type=a").1, "/x;y/z");
        assert_eq!(parsed("http://a.com/p;jsessionid=1?x").1, "/p");
    }

    #[test]
    fn test_ipv6_literal() {
        let (host, path) = parsed("http://[2001:DB8::1]:8080/index");
        assert_eq!(host, "2001:db8::1");
        assert_eq!(path, "/index");
    }

    #[test]
    fn test_unbalanced_bracket_degrades() {
        let url = "http://[::1/login";
        assert_eq!(parsed(url), ("".into(), url.into()));
        assert_eq!(split(url), Err(SplitError::UnbalancedBrackets));
    }

    #[test]
    fn test_bad_bracketed_host_degrades() {
        let url = "http://[not-an-ip]/x";
        assert_eq!(parsed(url), ("".into(), url.into()));
    }

    #[test]
    fn test_control_whitespace_removed() {
        assert_eq!(parsed("http://exa\tmple.com/pa\nth").0, "example.com");
        assert_eq!(parsed("http://exa\tmple.com/pa\nth").1, "/path");
    }

    #[test]
    fn test_empty_input() {
        // "http://" has an empty authority
        assert_eq!(parsed(""), ("".into(), "".into()));
    }
}
