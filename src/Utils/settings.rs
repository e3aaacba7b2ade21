use crate::Utils::logger::parse_level;
use crate::Utils::task_parser::{SectionMap, Value, parse_document_as};
use crate::plotting::plot_planner::{AXIS_RANGE, DEFAULT_SAMPLES, MAX_SAMPLES, SamplingDomain};
use log::{LevelFilter, debug};
use std::fs;
use std::path::Path;

const PLOT_KEYS: [&str; 4] = ["width", "height", "output", "samples"];
const LOG_KEYS: [&str; 3] = ["level", "file", "console"];

#[derive(Clone, Debug, PartialEq)]
pub struct PlotSettings {
    pub width: u32,
    pub height: u32,
    /// image file; `.svg` selects the SVG backend
    pub output: String,
    /// samples per axis
    pub samples: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 800,
            height: 600,
            output: "plot.png".to_string(),
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<String>,
    pub console: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: LevelFilter::Warn,
            file: None,
            console: true,
        }
    }
}

/// Settings of the command line calculator, read from a document like
/// ```text
/// plot  width: 800 height: 600 output: plot.png samples: 1000
/// log   level: info file: calc.log console: true
/// ```
/// Missing keys keep their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalcSettings {
    pub plot: PlotSettings,
    pub log: LogSettings,
}

fn single<'a>(section: &'a SectionMap, title: &str, key: &str) -> Result<Option<&'a Value>, String> {
    match section.get(key).map(|values| values.as_slice()) {
        None => Ok(None),
        Some([value]) => Ok(Some(value)),
        Some(_) => Err(format!("{}.{} takes exactly one value", title, key)),
    }
}

fn positive(value: &Value, title: &str, key: &str) -> Result<i64, String> {
    match value.as_integer() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(format!(
            "{}.{} must be a positive integer, got '{}'",
            title, key, value
        )),
    }
}

fn pixels(value: &Value, title: &str, key: &str) -> Result<u32, String> {
    let n = positive(value, title, key)?;
    u32::try_from(n).map_err(|_| format!("{}.{} is too large: {}", title, key, n))
}

fn check_keys(section: &SectionMap, title: &str, known: &[&str]) -> Result<(), String> {
    let mut unknown: Vec<&String> = section
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .collect();
    unknown.sort();
    match unknown.first() {
        Some(key) => Err(format!("unknown key '{}' in section '{}'", key, title)),
        None => Ok(()),
    }
}

impl CalcSettings {
    pub fn from_document(input: &str) -> Result<Self, String> {
        let document = parse_document_as(input)?;
        let mut titles: Vec<&String> = document.keys().collect();
        titles.sort();
        if let Some(title) = titles
            .iter()
            .find(|title| !matches!(title.as_str(), "plot" | "log"))
        {
            return Err(format!("unknown section '{}'", title));
        }

        let mut settings = CalcSettings::default();
        if let Some(section) = document.get("plot") {
            check_keys(section, "plot", &PLOT_KEYS)?;
            if let Some(value) = single(section, "plot", "width")? {
                settings.plot.width = pixels(value, "plot", "width")?;
            }
            if let Some(value) = single(section, "plot", "height")? {
                settings.plot.height = pixels(value, "plot", "height")?;
            }
            if let Some(value) = single(section, "plot", "output")? {
                settings.plot.output = value.to_string();
            }
            if let Some(value) = single(section, "plot", "samples")? {
                let samples = positive(value, "plot", "samples")?;
                if samples < 2 {
                    return Err("plot.samples must be at least 2".to_string());
                }
                // the implicit curve samples a samples x samples mesh
                if samples > MAX_SAMPLES as i64 {
                    return Err(format!(
                        "plot.samples must be at most {}, got {}",
                        MAX_SAMPLES, samples
                    ));
                }
                settings.plot.samples = samples as usize;
            }
        }
        if let Some(section) = document.get("log") {
            check_keys(section, "log", &LOG_KEYS)?;
            if let Some(value) = single(section, "log", "level")? {
                settings.log.level = parse_level(&value.to_string())?;
            }
            if let Some(value) = single(section, "log", "file")? {
                settings.log.file = Some(value.to_string());
            }
            if let Some(value) = single(section, "log", "console")? {
                settings.log.console = value
                    .as_boolean()
                    .ok_or_else(|| format!("log.console must be true or false, got '{}'", value))?;
            }
        }
        debug!("settings read: {:?}", settings);
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("cannot read {}: {}", path.as_ref().display(), e))?;
        Self::from_document(&text)
    }

    /// fixed axis range, configured sample count
    pub fn domain(&self) -> SamplingDomain {
        SamplingDomain::new(AXIS_RANGE.0, AXIS_RANGE.1, self.plot.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = CalcSettings::from_document("").unwrap();
        assert_eq!(settings, CalcSettings::default());
        assert_eq!(settings.plot.width, 800);
        assert_eq!(settings.plot.height, 600);
        assert_eq!(settings.plot.output, "plot.png");
        assert_eq!(settings.log.level, LevelFilter::Warn);
        assert_eq!(settings.domain(), SamplingDomain::default());
    }

    #[test]
    fn test_full_document() {
        let doc = "plot  width: 1024 height: 768 output: out.svg samples: 201\n\
                   log   level: info file: calc.log console: false";
        let settings = CalcSettings::from_document(doc).unwrap();
        assert_eq!(settings.plot.width, 1024);
        assert_eq!(settings.plot.height, 768);
        assert_eq!(settings.plot.output, "out.svg");
        assert_eq!(settings.domain().samples, 201);
        assert_eq!(settings.log.level, LevelFilter::Info);
        assert_eq!(settings.log.file.as_deref(), Some("calc.log"));
        assert!(!settings.log.console);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = CalcSettings::from_document("log level: debug").unwrap();
        assert_eq!(settings.log.level, LevelFilter::Debug);
        assert_eq!(settings.plot, PlotSettings::default());
    }

    #[test]
    fn test_rejections() {
        let err = CalcSettings::from_document("window width: 3").unwrap_err();
        assert_eq!(err, "unknown section 'window'");
        let err = CalcSettings::from_document("plot colour: red").unwrap_err();
        assert_eq!(err, "unknown key 'colour' in section 'plot'");
        assert!(CalcSettings::from_document("plot samples: 1").is_err());
        assert!(CalcSettings::from_document("plot width: -5").is_err());
        assert!(CalcSettings::from_document("plot width: 1, 2").is_err());
        let err = CalcSettings::from_document("plot samples: 1000000").unwrap_err();
        assert_eq!(err, "plot.samples must be at most 5000, got 1000000");
        assert_eq!(
            CalcSettings::from_document("plot samples: 5000").unwrap().plot.samples,
            5000
        );
        let err = CalcSettings::from_document("plot width: 5000000000").unwrap_err();
        assert_eq!(err, "plot.width is too large: 5000000000");
        assert!(CalcSettings::from_document("plot height: 4294967296").is_err());
        assert_eq!(
            CalcSettings::from_document("plot height: 4294967295").unwrap().plot.height,
            u32::MAX
        );
        assert!(CalcSettings::from_document("log level: loud").is_err());
        assert!(CalcSettings::from_document("log console: maybe").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# test settings").unwrap();
        writeln!(file, "plot samples: 50").unwrap();
        let settings = CalcSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.plot.samples, 50);
        assert!(CalcSettings::from_file("/nonexistent/settings.txt").is_err());
    }
}
