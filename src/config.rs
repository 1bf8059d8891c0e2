// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Generator configuration describing which parts of the MIB tree become
//! exporter modules.
//!
//! The types in this module mirror the YAML generator file. A module lists
//! the subtrees to walk, the index lookups to wire and per-metric
//! overrides. Override payloads are carried into the output unchanged.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

/// Root generator document.
///
/// # Examples
///
/// ```
/// use snmpgen::GeneratorConfig;
///
/// let yaml = r#"
/// modules:
///   if_mib:
///     walk: [interfaces]
/// "#;
/// let config: GeneratorConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.modules["if_mib"].walk, ["interfaces"]);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
pub struct GeneratorConfig
{
    /// Module specifications by module name.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleConfig,>,
}

/// Specification of a single exporter module.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig
{
    /// Labels or dotted OIDs of the subtrees to walk.
    #[serde(default)]
    pub walk:      Vec<String,>,
    /// Index crosswalks applied to every metric keyed by `old_index`.
    #[serde(default)]
    pub lookups:   Vec<LookupConfig,>,
    /// Per-metric overrides keyed by node label.
    #[serde(default)]
    pub overrides: BTreeMap<String, MetricOverrides,>,
}

/// Replaces the `old_index` label of every metric with values read from
/// the `new_index` column.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig
{
    /// Label or OID of the index column being replaced.
    pub old_index: String,
    /// Label or OID of the column that supplies the new label values.
    pub new_index: String,
}

/// Overrides attached to a metric by label.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct MetricOverrides
{
    /// Value extraction rules by metric name suffix, passed to the exporter.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regex_extracts: BTreeMap<String, Vec<RegexpExtract,>,>,
}

/// Pattern and replacement template of one value extraction rule.
///
/// The pattern is not compiled or validated here; the exporter does that
/// when it loads its configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
#[serde(deny_unknown_fields)]
pub struct RegexpExtract
{
    pub regex: String,
    pub value: String,
}

/// Loads the generator configuration from the provided YAML file path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read, the YAML cannot be
/// deserialized, or the document declares no modules.
pub fn load_generator_config(path: &Path,) -> Result<GeneratorConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_generator_config(&contents,)
}

/// Parses the generator configuration from a YAML document string.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::Validation`](Error::Validation) when no module is declared.
pub fn parse_generator_config(contents: &str,) -> Result<GeneratorConfig, Error,>
{
    let config: GeneratorConfig = serde_yaml::from_str(contents,)?;
    if config.modules.is_empty() {
        return Err(Error::validation("configuration must declare at least one module",),);
    }
    Ok(config,)
}

#[cfg(test)]
mod tests
{
    use std::io::Write;

    use super::{LookupConfig, RegexpExtract, load_generator_config, parse_generator_config};
    use crate::error::Error;

    #[test]
    fn parses_full_module()
    {
        let yaml = r"
            modules:
              if_mib:
                walk: [interfaces, 1.3.6.1.2.1.31.1.1]
                lookups:
                  - old_index: ifIndex
                    new_index: ifDescr
                overrides:
                  ifType:
                    regex_extracts:
                      Status:
                        - regex: '.*'
                          value: '5'
        ";

        let config = parse_generator_config(yaml,).expect("expected parse success",);
        let module = &config.modules["if_mib"];
        assert_eq!(module.walk, ["interfaces", "1.3.6.1.2.1.31.1.1"]);
        assert_eq!(module.lookups, [LookupConfig {
            old_index: "ifIndex".to_owned(),
            new_index: "ifDescr".to_owned(),
        }]);
        assert_eq!(module.overrides["ifType"].regex_extracts["Status"], [RegexpExtract {
            regex: ".*".to_owned(),
            value: "5".to_owned(),
        }]);
    }

    #[test]
    fn sections_default_to_empty()
    {
        let config = parse_generator_config("modules:\n  bare: {}\n",).expect("expected parse success",);
        let module = &config.modules["bare"];
        assert!(module.walk.is_empty());
        assert!(module.lookups.is_empty());
        assert!(module.overrides.is_empty());
    }

    #[test]
    fn rejects_empty_configuration()
    {
        let error = parse_generator_config("modules: {}",).expect_err("expected validation error",);
        match error {
            Error::Validation {
                message,
            } => {
                assert_eq!(message, "configuration must declare at least one module");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_module_fields()
    {
        let yaml = "modules:\n  m:\n    walks: [system]\n";
        let error = parse_generator_config(yaml,).expect_err("expected decode error",);
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn rejects_incomplete_lookup()
    {
        let yaml = "modules:\n  m:\n    lookups:\n      - old_index: ifIndex\n";
        let error = parse_generator_config(yaml,).expect_err("expected decode error",);
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn load_reads_configuration_from_disk()
    {
        let mut file = tempfile::NamedTempFile::new().expect("expected temp file",);
        write!(file, "modules:\n  system:\n    walk: [system]\n").expect("expected write to succeed",);

        let config = load_generator_config(file.path(),).expect("expected load to succeed",);
        assert_eq!(config.modules["system"].walk, ["system"]);
    }

    #[test]
    fn load_reports_io_errors()
    {
        let path = std::path::Path::new("/nonexistent/generator.yml",);
        let error = load_generator_config(path,).expect_err("expected io error",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
