//! Environment variable overrides
//!
//! Every overridable field is one row in [`ENV_OVERRIDES`]. A non-empty
//! variable replaces the file value; there is no precedence between variables.

use super::env::EnvSnapshot;
use super::schema::FileConfig;
use crate::domain::{ConfigError, OverrideCause};

/// Field selector and the type its override must parse as
#[derive(Clone, Copy)]
pub enum Target {
    /// Assigned verbatim
    Text(fn(&mut FileConfig) -> &mut String),
    /// Must be a boolean literal
    Flag(fn(&mut FileConfig) -> &mut bool),
    /// Must be a base-10 port number
    Port(fn(&mut FileConfig) -> &mut u16),
}

/// One environment variable and the field it overrides
#[derive(Clone, Copy)]
pub struct EnvOverride {
    /// Environment variable name
    pub variable: &'static str,
    /// Field it writes to
    pub target: Target,
}

/// All supported overrides, applied in this order
pub const ENV_OVERRIDES: &[EnvOverride] = &[
    EnvOverride {
        variable: "MINIO_SERVER",
        target: Target::Text(|c| &mut c.minio.server),
    },
    EnvOverride {
        variable: "MINIO_ACCESS_KEY",
        target: Target::Text(|c| &mut c.minio.access_key),
    },
    EnvOverride {
        variable: "MINIO_SECRET",
        target: Target::Text(|c| &mut c.minio.secret),
    },
    EnvOverride {
        variable: "MINIO_HTTPS",
        target: Target::Flag(|c| &mut c.minio.https),
    },
    EnvOverride {
        variable: "PG_SERVER",
        target: Target::Text(|c| &mut c.pg.server),
    },
    EnvOverride {
        variable: "PG_PORT",
        target: Target::Port(|c| &mut c.pg.port),
    },
    EnvOverride {
        variable: "PG_USER",
        target: Target::Text(|c| &mut c.pg.username),
    },
    EnvOverride {
        variable: "PG_PASS",
        target: Target::Text(|c| &mut c.pg.password),
    },
    EnvOverride {
        variable: "PG_DBNAME",
        target: Target::Text(|c| &mut c.pg.database),
    },
];

impl EnvOverride {
    /// Parse `value` for this field and assign it
    pub fn apply(&self, config: &mut FileConfig, value: &str) -> Result<(), ConfigError> {
        match self.target {
            Target::Text(field) => *field(config) = value.to_string(),
            Target::Flag(field) => {
                *field(config) =
                    parse_bool(value).map_err(|source| ConfigError::OverrideParse {
                        variable: self.variable,
                        source,
                    })?
            }
            Target::Port(field) => {
                *field(config) = value.parse::<u16>().map_err(|source| {
                    ConfigError::OverrideParse {
                        variable: self.variable,
                        source: OverrideCause::InvalidInteger {
                            value: value.to_string(),
                            source,
                        },
                    }
                })?
            }
        }
        Ok(())
    }
}

/// Applies every non-empty override in `env` to `config`
///
/// # Errors
///
/// Returns [`ConfigError::OverrideParse`] for the first variable whose value
/// does not convert to the field's type.
pub fn apply_env_overrides(config: &mut FileConfig, env: &EnvSnapshot) -> Result<(), ConfigError> {
    for entry in ENV_OVERRIDES {
        if let Some(value) = env.get(entry.variable) {
            entry.apply(config, value)?;
            tracing::debug!(variable = entry.variable, "Applied environment override");
        }
    }
    Ok(())
}

/// Parses the boolean literals accepted for flag overrides
fn parse_bool(value: &str) -> Result<bool, OverrideCause> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(OverrideCause::InvalidBool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("true", true)]
    #[test_case("True", true)]
    #[test_case("TRUE", true)]
    #[test_case("t", true)]
    #[test_case("1", true)]
    #[test_case("false", false)]
    #[test_case("False", false)]
    #[test_case("FALSE", false)]
    #[test_case("f", false)]
    #[test_case("0", false)]
    fn test_parse_bool_literals(input: &str, expected: bool) {
        assert_eq!(parse_bool(input).unwrap(), expected);
    }

    #[test_case("notabool")]
    #[test_case("yes")]
    #[test_case("tRuE")]
    #[test_case(" true")]
    fn test_parse_bool_rejects(input: &str) {
        assert!(matches!(
            parse_bool(input),
            Err(OverrideCause::InvalidBool(_))
        ));
    }

    #[test]
    fn test_every_override_targets_a_distinct_field() {
        // Apply each override alone and check it changed exactly one field.
        for entry in ENV_OVERRIDES {
            let mut config = FileConfig::default();
            let value = match entry.target {
                Target::Text(_) => "override",
                Target::Flag(_) => "true",
                Target::Port(_) => "6543",
            };
            entry.apply(&mut config, value).unwrap();

            let changed = [
                config.minio.server == "override",
                config.minio.access_key == "override",
                config.minio.secret == "override",
                config.minio.https,
                config.pg.server == "override",
                config.pg.port == 6543,
                config.pg.username == "override",
                config.pg.password == "override",
                config.pg.database == "override",
            ];
            assert_eq!(
                changed.iter().filter(|c| **c).count(),
                1,
                "{} should set exactly one field",
                entry.variable
            );
        }
    }

    #[test]
    fn test_override_table_variable_names() {
        let names: Vec<_> = ENV_OVERRIDES.iter().map(|o| o.variable).collect();
        assert_eq!(
            names,
            vec![
                "MINIO_SERVER",
                "MINIO_ACCESS_KEY",
                "MINIO_SECRET",
                "MINIO_HTTPS",
                "PG_SERVER",
                "PG_PORT",
                "PG_USER",
                "PG_PASS",
                "PG_DBNAME",
            ]
        );
    }

    #[test]
    fn test_port_override_rejects_non_numeric() {
        let mut config = FileConfig::default();
        let env = EnvSnapshot::from_pairs([("PG_PORT", "abc")]);

        let err = apply_env_overrides(&mut config, &env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OverrideParse {
                variable: "PG_PORT",
                source: OverrideCause::InvalidInteger { .. }
            }
        ));
    }

    #[test]
    fn test_port_override_rejects_out_of_range() {
        let mut config = FileConfig::default();
        let env = EnvSnapshot::from_pairs([("PG_PORT", "70000")]);
        assert!(apply_env_overrides(&mut config, &env).is_err());
    }

    #[test]
    fn test_empty_values_leave_file_values() {
        let mut config = FileConfig::default();
        config.pg.server = "from-file".to_string();
        let env = EnvSnapshot::from_pairs([("PG_SERVER", ""), ("PG_PORT", "")]);

        apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.pg.server, "from-file");
        assert_eq!(config.pg.port, 0);
    }
}
