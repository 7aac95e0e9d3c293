//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting mounts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EchoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{EchoConfig, RouteConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("no routes configured")]
    NoRoutes,

    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("duplicate route name '{0}'")]
    DuplicateRouteName(String),

    #[error("route '{route}' has invalid mount path '{path}': {reason}")]
    InvalidMountPath {
        route: String,
        path: String,
        reason: &'static str,
    },

    #[error("mount path '{0}' is used by more than one route")]
    DuplicateMountPath(String),

    #[error("mount path '{inner}' is nested under '{outer}'")]
    NestedMountPath { outer: String, inner: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("unknown log format '{0}' (expected 'full' or 'compact')")]
    UnknownLogFormat(String),
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    validate_routes(&config.routes, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let observability = &config.observability;
    if !matches!(observability.log_format.as_str(), "full" | "compact") {
        errors.push(ValidationError::UnknownLogFormat(observability.log_format.clone()));
    }

    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    if routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
        return;
    }

    let mut names = HashSet::new();
    let mut mounts = HashSet::new();

    for (index, route) in routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        if let Err(reason) = check_mount_path(&route.mount_path) {
            errors.push(ValidationError::InvalidMountPath {
                route: route.name.clone(),
                path: route.mount_path.clone(),
                reason,
            });
            continue;
        }

        if !mounts.insert(route.mount_path.as_str()) {
            errors.push(ValidationError::DuplicateMountPath(route.mount_path.clone()));
        }
    }

    // "/" is the router fallback, so only non-root mounts can collide.
    let mut prefixes: Vec<&str> = mounts.into_iter().filter(|m| *m != "/").collect();
    prefixes.sort_unstable();
    for (i, outer) in prefixes.iter().enumerate() {
        for inner in &prefixes[i + 1..] {
            if is_nested(outer, inner) {
                errors.push(ValidationError::NestedMountPath {
                    outer: outer.to_string(),
                    inner: inner.to_string(),
                });
            }
        }
    }
}

fn check_mount_path(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("must start with '/'");
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err("must not end with '/'");
    }
    if path.contains("//") {
        return Err("must not contain empty segments");
    }
    if path.contains(['{', '}', '*']) {
        return Err("must not contain route parameters");
    }
    Ok(())
}

fn is_nested(outer: &str, inner: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HandlerKind;

    fn route(name: &str, mount_path: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            mount_path: mount_path.into(),
            handler: HandlerKind::Echo,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&EchoConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = EchoConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.log_format = "json".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::UnknownLogFormat("json".into())));
    }

    #[test]
    fn test_mount_path_rules() {
        let mut config = EchoConfig::default();
        config.routes = vec![
            route("a", "api"),
            route("b", "/trailing/"),
            route("c", "/{param}"),
            route("d", "/ok"),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidMountPath { .. })));
    }

    #[test]
    fn test_duplicate_and_nested_mounts() {
        let mut config = EchoConfig::default();
        config.routes = vec![
            route("root", "/"),
            route("api", "/api"),
            route("api-v1", "/api/v1"),
            route("apix", "/apix"),
            route("api", "/apix"),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateRouteName("api".into())));
        assert!(errors.contains(&ValidationError::DuplicateMountPath("/apix".into())));
        assert!(errors.contains(&ValidationError::NestedMountPath {
            outer: "/api".into(),
            inner: "/api/v1".into(),
        }));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_no_routes() {
        let mut config = EchoConfig::default();
        config.routes.clear();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::NoRoutes]));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = EchoConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
