use std::path::PathBuf;

/// Results file looked up in the working directory when none is given.
pub const DEFAULT_DATA_FILE: &str = "openipf.csv";

/// How many lifters each ranking chart shows.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// File loaded at startup.
    pub data_path: PathBuf,
    pub top_n: usize,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            top_n: DEFAULT_TOP_N,
            title: "Power Pro Metrics".to_string(),
            window_size: [1280.0, 900.0],
            min_window_size: [720.0, 480.0],
        }
    }
}

impl AppConfig {
    /// Defaults, with the data path replaced by the first positional argument
    /// if there is one.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().find(|a| !a.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
