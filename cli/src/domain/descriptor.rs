//! launchd job definition rendering.
//!
//! Pure function of an [`Environment`]: same input, byte-identical output.
//! Keys are emitted in a fixed order and environment variables are sorted.

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::escape::escape;

use crate::domain::environment::{Environment, LABEL_VAR, RUN_MODE_VAR, validate_environment};
use crate::domain::error::LaunchError;

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

/// Render the property-list job definition for `env`.
///
/// # Errors
///
/// Returns `DescriptorGeneration` if any required field is missing or invalid.
pub fn render_descriptor(env: &Environment) -> Result<String, LaunchError> {
    validate_environment(env)?;

    let mut plist = PlistWriter::new();
    plist.open("dict");

    plist.key("Label");
    plist.string(&env.label);

    plist.key("ProgramArguments");
    plist.open("array");
    plist.string(path_str(&env.program)?);
    for arg in &env.args {
        plist.string(arg);
    }
    plist.close("array");

    let mut vars: BTreeMap<&str, &str> = env
        .env
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    vars.insert(LABEL_VAR, &env.label);
    vars.insert(RUN_MODE_VAR, env.run_mode.as_str());
    plist.key("EnvironmentVariables");
    plist.open("dict");
    for (name, value) in vars {
        plist.key(name);
        plist.string(value);
    }
    plist.close("dict");

    if let Some(dir) = &env.working_dir {
        plist.key("WorkingDirectory");
        plist.string(path_str(dir)?);
    }

    plist.key("KeepAlive");
    plist.bool(env.keep_alive);
    plist.key("RunAtLoad");
    plist.bool(env.run_at_load);

    if let Some(log) = env.log_path() {
        let log = path_str(&log)?;
        plist.key("StandardOutPath");
        plist.string(log);
        plist.key("StandardErrorPath");
        plist.string(log);
    }

    plist.close("dict");
    Ok(plist.finish())
}

fn path_str(path: &Path) -> Result<&str, LaunchError> {
    path.to_str().ok_or_else(|| {
        LaunchError::DescriptorGeneration(format!("path '{}' is not valid UTF-8", path.display()))
    })
}

/// Indenting property-list emitter; tabs, one element per line.
struct PlistWriter {
    out: String,
    depth: usize,
}

impl PlistWriter {
    fn new() -> Self {
        Self {
            out: String::from(HEADER),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{tag}>"));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{tag}>"));
    }

    fn key(&mut self, key: &str) {
        self.line(&format!("<key>{}</key>", escape(key)));
    }

    fn string(&mut self, value: &str) {
        self.line(&format!("<string>{}</string>", escape(value)));
    }

    fn bool(&mut self, value: bool) {
        self.line(if value { "<true/>" } else { "<false/>" });
    }

    fn finish(mut self) -> String {
        self.out.push_str("</plist>\n");
        self.out
    }
}
