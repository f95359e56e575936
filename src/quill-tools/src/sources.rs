//! Plugin source specification parsing.
//!
//! A plugin can be sourced from a git host shorthand
//! (`github:owner/repo`), a bare `owner/repo`, an explicit URL, or a
//! local path. Shorthand forms accept `@ref` for a branch/tag/commit and
//! `#subdir` for a directory inside the repository. Parsing is pure;
//! fetching belongs to the host.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Errors from parsing a plugin source specification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Plugin source is empty")]
    Empty,

    #[error("Invalid plugin source '{spec}': {reason}")]
    Invalid { spec: String, reason: String },
}

/// A resolved plugin source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginSource {
    /// A git repository, by clone URL.
    Git {
        url: String,
        /// Branch, tag, or commit to check out.
        reference: Option<String>,
        /// Directory inside the repository holding the plugin.
        subdir: Option<String>,
    },
    /// A directory on the local machine.
    Local { path: PathBuf },
}

impl PluginSource {
    /// Parse a source specification.
    pub fn parse(spec: &str) -> Result<Self, SourceError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(SourceError::Empty);
        }

        if spec.starts_with("./")
            || spec.starts_with("../")
            || spec.starts_with('/')
            || spec.starts_with("~/")
        {
            return Ok(PluginSource::Local {
                path: PathBuf::from(spec),
            });
        }

        if let Some(rest) = spec.strip_prefix("github:") {
            return parse_shorthand(spec, rest, "github.com");
        }
        if let Some(rest) = spec.strip_prefix("gitlab:") {
            return parse_shorthand(spec, rest, "gitlab.com");
        }

        if spec.starts_with("http://") || spec.starts_with("https://") {
            let (base, subdir) = split_fragment(spec);
            Url::parse(base).map_err(|e| SourceError::Invalid {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(PluginSource::Git {
                url: base.to_string(),
                reference: None,
                subdir,
            });
        }

        if spec.starts_with("git@") {
            let (base, subdir) = split_fragment(spec);
            return Ok(PluginSource::Git {
                url: base.to_string(),
                reference: None,
                subdir,
            });
        }

        // Bare `owner/repo` shorthand defaults to GitHub.
        if spec.matches('/').count() == 1 && !spec.contains(':') {
            return parse_shorthand(spec, spec, "github.com");
        }

        Err(SourceError::Invalid {
            spec: spec.to_string(),
            reason: "expected github:owner/repo, owner/repo, a git URL, or a local path"
                .to_string(),
        })
    }

    /// The URL a host would fetch from, when the source is remote.
    pub fn fetch_url(&self) -> Option<&str> {
        match self {
            PluginSource::Git { url, .. } => Some(url),
            PluginSource::Local { .. } => None,
        }
    }
}

fn parse_shorthand(spec: &str, rest: &str, host: &str) -> Result<PluginSource, SourceError> {
    let (rest, subdir) = split_fragment(rest);
    let (repo_part, reference) = match rest.split_once('@') {
        Some((repo, reference)) if !reference.is_empty() => (repo, Some(reference.to_string())),
        Some(_) => {
            return Err(SourceError::Invalid {
                spec: spec.to_string(),
                reason: "empty reference after '@'".to_string(),
            });
        }
        None => (rest, None),
    };

    let Some((owner, repo)) = repo_part.split_once('/') else {
        return Err(SourceError::Invalid {
            spec: spec.to_string(),
            reason: "expected owner/repo".to_string(),
        });
    };
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(SourceError::Invalid {
            spec: spec.to_string(),
            reason: "expected owner/repo".to_string(),
        });
    }

    Ok(PluginSource::Git {
        url: format!("https://{host}/{owner}/{repo}.git"),
        reference,
        subdir,
    })
}

fn split_fragment(spec: &str) -> (&str, Option<String>) {
    match spec.split_once('#') {
        Some((base, subdir)) if !subdir.is_empty() => (base, Some(subdir.to_string())),
        Some((base, _)) => (base, None),
        None => (spec, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_shorthand() {
        let source = PluginSource::parse("github:acme/tools").unwrap();
        assert_eq!(
            source,
            PluginSource::Git {
                url: "https://github.com/acme/tools.git".to_string(),
                reference: None,
                subdir: None,
            }
        );
        assert_eq!(source.fetch_url(), Some("https://github.com/acme/tools.git"));
    }

    #[test]
    fn shorthand_with_reference_and_subdir() {
        let source = PluginSource::parse("github:acme/tools@v2.1#plugins/fmt").unwrap();
        assert_eq!(
            source,
            PluginSource::Git {
                url: "https://github.com/acme/tools.git".to_string(),
                reference: Some("v2.1".to_string()),
                subdir: Some("plugins/fmt".to_string()),
            }
        );
    }

    #[test]
    fn bare_owner_repo_defaults_to_github() {
        let source = PluginSource::parse("acme/tools").unwrap();
        assert_eq!(
            source.fetch_url(),
            Some("https://github.com/acme/tools.git")
        );
    }

    #[test]
    fn gitlab_shorthand() {
        let source = PluginSource::parse("gitlab:acme/tools").unwrap();
        assert_eq!(
            source.fetch_url(),
            Some("https://gitlab.com/acme/tools.git")
        );
    }

    #[test]
    fn explicit_urls_pass_through() {
        let source = PluginSource::parse("https://example.com/repo.git").unwrap();
        assert_eq!(source.fetch_url(), Some("https://example.com/repo.git"));

        let source = PluginSource::parse("git@github.com:acme/tools.git").unwrap();
        assert_eq!(source.fetch_url(), Some("git@github.com:acme/tools.git"));
    }

    #[test]
    fn local_paths() {
        assert_eq!(
            PluginSource::parse("./plugins/fmt").unwrap(),
            PluginSource::Local {
                path: PathBuf::from("./plugins/fmt")
            }
        );
        assert!(matches!(
            PluginSource::parse("/opt/plugins/fmt").unwrap(),
            PluginSource::Local { .. }
        ));
        assert_eq!(PluginSource::parse("~/plugins/fmt").unwrap().fetch_url(), None);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert_eq!(PluginSource::parse("   "), Err(SourceError::Empty));
        assert!(PluginSource::parse("github:acme").is_err());
        assert!(PluginSource::parse("github:acme/tools@").is_err());
        assert!(PluginSource::parse("github:/tools").is_err());
        assert!(PluginSource::parse("not a source").is_err());
        assert!(PluginSource::parse("https://exa mple/bad url").is_err());
    }
}
