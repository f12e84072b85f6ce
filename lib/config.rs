//! Loading presets from style files.
//!
//! A style directory holds one file per preset, named after the preset, in
//! any of the following formats:
//! - [TOML][toml] (`.toml`)
//! - [JSON][serde_json] (`.json`)
//! - [YAML][serde_yaml] (`.yaml`, `.yml`)
//!
//! Every file has the same structure; in TOML:
//!
//! ```toml
//! palette = ["#5da5da", "#faa43a"]
//!
//! [fix]
//! clean_spines = false
//! labelpad = 5
//!
//! [rc]
//! "font.size" = 10.0
//! "figure.figsize" = [3.5, 2.625]
//! ```
//!
//! All three sections are optional. Keys under `fix` must be recognized style
//! options; keys under `rc` are passed to the backend untouched.

use std::{
    fs,
    path::Path,
};
use serde_json as json;
use serde_yaml as yaml;
use thiserror::Error;
use tracing::{ debug, warn };
use crate::{
    preset::{ Preset, PresetRegistry },
    style::BASELINE,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: couldn't read file '{0}': {1}")]
    FileRead(String, String),

    #[error("config: couldn't parse file '{0}': {1}")]
    FileParse(String, String),

    #[error("config: couldn't parse string: {0}")]
    StrParse(String),

    #[error("config: unrecognized style file extension for '{0}'")]
    UnknownFormat(String),

    #[error("config: couldn't read style directory '{0}': {1}")]
    DirRead(String, String),

    #[error("config: style directory '{0}' has no 'basic' preset")]
    MissingBaseline(String),

    #[error("config: malformed rc parameter key '{1}' in '{0}'")]
    InvalidRcKey(String, String),

    #[error("config: couldn't write to file '{0}': {1}")]
    FileWrite(String, String),

    #[error("config: TOML error '{0}'")]
    TomlError(#[from] toml::ser::Error),
}
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Style file format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleFormat {
    Toml,
    Json,
    Yaml,
}

impl StyleFormat {
    /// Guess the format from a file extension.
    pub fn from_path<P>(path: P) -> Option<Self>
    where P: AsRef<Path>
    {
        match path.as_ref().extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse a preset from a string.
pub fn parse_preset(s: &str, format: StyleFormat) -> ConfigResult<Preset> {
    let preset: Preset = match format {
        StyleFormat::Toml =>
            toml::from_str(s).map_err(|e| ConfigError::StrParse(e.to_string()))?,
        StyleFormat::Json =>
            json::from_str(s).map_err(|e| ConfigError::StrParse(e.to_string()))?,
        StyleFormat::Yaml =>
            yaml::from_str(s).map_err(|e| ConfigError::StrParse(e.to_string()))?,
    };
    preset.rc.validate()
        .map_err(|e| ConfigError::StrParse(e.to_string()))?;
    Ok(preset)
}

/// Load a preset from a file, with the format taken from its extension.
pub fn load_preset<P>(infile: P) -> ConfigResult<Preset>
where P: AsRef<Path>
{
    let infile_str: String = infile.as_ref().display().to_string();
    let format = StyleFormat::from_path(&infile)
        .ok_or_else(|| ConfigError::UnknownFormat(infile_str.clone()))?;
    let contents: String
        = fs::read_to_string(&infile)
        .map_err(|e| ConfigError::FileRead(infile_str.clone(), e.to_string()))?;
    let preset: Preset = match format {
        StyleFormat::Toml =>
            toml::from_str(&contents)
            .map_err(|e| ConfigError::FileParse(infile_str.clone(), e.to_string()))?,
        StyleFormat::Json =>
            json::from_str(&contents)
            .map_err(|e| ConfigError::FileParse(infile_str.clone(), e.to_string()))?,
        StyleFormat::Yaml =>
            yaml::from_str(&contents)
            .map_err(|e| ConfigError::FileParse(infile_str.clone(), e.to_string()))?,
    };
    if let Some((key, _)) = preset.rc.iter().find(|(k, _)| crate::style::check_rc_key(k).is_err()) {
        return Err(ConfigError::InvalidRcKey(infile_str, key.clone()));
    }
    Ok(preset)
}

/// Write a preset as pretty-printed TOML.
pub fn write_preset<P>(outfile: P, preset: &Preset) -> ConfigResult<()>
where P: AsRef<Path>
{
    let outfile_str: String = outfile.as_ref().display().to_string();
    let contents: String = toml::to_string_pretty(preset)?;
    fs::write(&outfile, contents)
        .map_err(|e| ConfigError::FileWrite(outfile_str, e.to_string()))
}

/// Load every recognized style file in `dir` (not recursively). Files with
/// other extensions are skipped.
pub fn load_dir<P>(dir: P) -> ConfigResult<PresetRegistry>
where P: AsRef<Path>
{
    let dir_str: String = dir.as_ref().display().to_string();
    let entries
        = fs::read_dir(&dir)
        .map_err(|e| ConfigError::DirRead(dir_str.clone(), e.to_string()))?;
    let mut registry = PresetRegistry::empty();
    for entry in entries {
        let path
            = entry
            .map_err(|e| ConfigError::DirRead(dir_str.clone(), e.to_string()))?
            .path();
        if !path.is_file() { continue; }
        if StyleFormat::from_path(&path).is_none() {
            debug!(path = %path.display(), "skipping non-style file");
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "style file name is not valid UTF-8");
            continue;
        };
        let preset = load_preset(&path)?;
        if registry.insert(name, preset).is_some() {
            warn!(name, "style defined by more than one file; keeping the last one read");
        }
    }
    debug!(dir = %dir_str, count = registry.len(), "loaded style directory");
    Ok(registry)
}

impl PresetRegistry {
    /// A registry holding exactly the presets in `dir`, which must define the
    /// baseline preset.
    pub fn from_dir<P>(dir: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let registry = load_dir(&dir)?;
        if registry.contains(BASELINE) {
            Ok(registry)
        } else {
            Err(ConfigError::MissingBaseline(dir.as_ref().display().to_string()))
        }
    }

    /// Add the presets in `dir` to `self`, replacing same-named ones.
    pub fn load_dir<P>(&mut self, dir: P) -> ConfigResult<()>
    where P: AsRef<Path>
    {
        self.extend(load_dir(dir)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ colors::Rgb, style::RcValue };

    #[test]
    fn parse_all_formats() {
        let toml_src = r##"
            palette = ["#000", "#fff"]

            [fix]
            clean_spines = false
            labelpad = 5

            [rc]
            "font.size" = 10.0
        "##;
        let json_src = r##"{
            "palette": ["#000", "#fff"],
            "fix": { "clean_spines": false, "labelpad": 5 },
            "rc": { "font.size": 10.0 }
        }"##;
        let yaml_src = "
palette: ['#000', '#fff']
fix:
  clean_spines: false
  labelpad: 5
rc:
  font.size: 10.0
";
        for (src, format) in [
            (toml_src, StyleFormat::Toml),
            (json_src, StyleFormat::Json),
            (yaml_src, StyleFormat::Yaml),
        ] {
            let preset = parse_preset(src, format).unwrap();
            assert_eq!(preset.fix.clean_spines, Some(false));
            assert_eq!(preset.fix.labelpad, Some(5.0));
            assert_eq!(preset.rc.get("font.size"), Some(&RcValue::Float(10.0)));
            assert_eq!(preset.palette, Some(vec![Rgb(0, 0, 0), Rgb(255, 255, 255)]));
        }
    }

    #[test]
    fn unknown_fix_option_rejected() {
        let src = "[fix]\nshiny = true\n";
        assert!(matches!(
            parse_preset(src, StyleFormat::Toml),
            Err(ConfigError::StrParse(_))
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(StyleFormat::from_path("a/basic.toml"), Some(StyleFormat::Toml));
        assert_eq!(StyleFormat::from_path("talk.yml"), Some(StyleFormat::Yaml));
        assert_eq!(StyleFormat::from_path("poster.mplstyle"), None);
    }
}
