///! Configuration for classification and the gallery
///!
///! Values come from the environment with hardcoded defaults as fallback.
use std::time::Duration;

use crate::image_processor::magic::HEADER_LEN;

const PROBE_TIMEOUT_VAR: &str = "PICSIFT_PROBE_TIMEOUT_MS";
const SORT_VAR: &str = "PICSIFT_SORT";

/// Default bound on a single decode probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Extension used when only the decode probe recognized the blob
pub const DEFAULT_FALLBACK_EXTENSION: &str = ".png";

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Upper bound on how long one decode probe may take
    pub probe_timeout: Duration,

    /// Number of leading bytes handed to the header sniffer
    pub header_len: usize,

    /// Extension suggested for blobs confirmed only by the decode probe
    pub fallback_extension: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            header_len: HEADER_LEN,
            fallback_extension: DEFAULT_FALLBACK_EXTENSION.to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Read overrides from the environment
    ///
    /// `PICSIFT_PROBE_TIMEOUT_MS` sets the probe timeout. Missing, unparsable
    /// or zero values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        match read_probe_timeout() {
            Some(timeout) => config.probe_timeout = timeout,
            None => tracing::debug!(
                "{} not set or invalid, using default {:?}",
                PROBE_TIMEOUT_VAR,
                config.probe_timeout
            ),
        }

        config
    }
}

fn read_probe_timeout() -> Option<Duration> {
    let raw = std::env::var(PROBE_TIMEOUT_VAR).ok()?;
    let millis: u64 = raw.trim().parse().ok()?;
    (millis > 0).then(|| Duration::from_millis(millis))
}

/// How gallery paths are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Case-insensitive character order, `page10` before `page2`
    #[default]
    Locale,
    /// Digit runs compare by value, `page2` before `page10`
    Natural,
}

impl SortOrder {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "locale" => Some(Self::Locale),
            "natural" => Some(Self::Natural),
            _ => None,
        }
    }
}

/// Gallery settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryConfig {
    pub sort_order: SortOrder,
}

impl GalleryConfig {
    /// Read overrides from the environment
    ///
    /// `PICSIFT_SORT` accepts `locale` or `natural`.
    pub fn from_env() -> Self {
        let sort_order = match std::env::var(SORT_VAR).ok().as_deref().and_then(SortOrder::parse) {
            Some(order) => order,
            None => {
                tracing::debug!("{} not set or invalid, using locale order", SORT_VAR);
                SortOrder::default()
            }
        };

        Self { sort_order }
    }
}
