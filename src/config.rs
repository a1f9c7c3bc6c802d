use serde::Deserialize;

const DEFAULT_CYCLE_TRACE: &str = "cycle_trace.txt";
const DEFAULT_SRAMI_DUMP: &str = "srami_out.txt";
const DEFAULT_SRAMD_DUMP: &str = "sramd_out.txt";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_trace_cycles")]
    pub trace_cycles: bool,

    // 0 means no limit
    #[serde(default)]
    pub max_cycles: u64,
}

#[derive(Debug, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_cycle_trace")]
    pub cycle_trace: String,

    #[serde(default = "default_srami_dump")]
    pub srami_dump: String,

    #[serde(default = "default_sramd_dump")]
    pub sramd_dump: String,
}

impl Config {
    pub fn trace_enabled(&self) -> bool {
        cfg!(feature = "always-trace") || self.general.trace_cycles
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: default_trace_cycles(),
            max_cycles: 0,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            cycle_trace: default_cycle_trace(),
            srami_dump: default_srami_dump(),
            sramd_dump: default_sramd_dump(),
        }
    }
}

fn default_trace_cycles() -> bool {
    true
}

fn default_cycle_trace() -> String {
    DEFAULT_CYCLE_TRACE.to_string()
}

fn default_srami_dump() -> String {
    DEFAULT_SRAMI_DUMP.to_string()
}

fn default_sramd_dump() -> String {
    DEFAULT_SRAMD_DUMP.to_string()
}
