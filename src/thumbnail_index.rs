/*!
 * Seek thumbnail index.
 *
 * Turns parsed cues into thumbnail locators and answers "which thumbnail
 * belongs to this playback time" queries. Two locator strategies exist:
 *
 * - direct mode: each cue's text is the absolute URL of its thumbnail
 * - legacy sprite mode: every cue points at one sprite image and only the
 *   `#xywh=` region fragment taken from the cue text differs
 *
 * The index never changes after construction, so a single instance can be
 * queried from any number of threads.
 */

use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cue_parser::{self, CueRecord};
use crate::errors::{AppError, ThumbnailError};
use crate::region::RegionFragment;

// Region fragment inside cue text, `#` included
static SPRITE_FRAGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#xywh=[0-9]+,[0-9]+,[0-9]+,[0-9]+").unwrap()
});

/// Options for building a [`ThumbnailIndex`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexOptions {
    /// Sprite image shared by all cues. `None` or an empty string selects
    /// direct mode.
    #[serde(default)]
    pub sprite_base_url: Option<String>,
}

impl IndexOptions {
    /// Options selecting direct mode
    pub fn direct() -> Self {
        Self::default()
    }

    /// Options selecting legacy sprite mode with the given base URL
    pub fn with_sprite_base_url(url: impl Into<String>) -> Self {
        Self {
            sprite_base_url: Some(url.into()),
        }
    }

    fn locator_mode(&self) -> Result<LocatorMode, ThumbnailError> {
        match self.sprite_base_url.as_deref() {
            None | Some("") => Ok(LocatorMode::Direct),
            Some(base) => Url::parse(base)
                .map(LocatorMode::Sprite)
                .map_err(|source| ThumbnailError::InvalidSpriteBaseUrl {
                    url: base.to_string(),
                    source,
                }),
        }
    }
}

enum LocatorMode {
    Direct,
    Sprite(Url),
}

impl LocatorMode {
    fn resolve(&self, text: &str) -> Result<Url, ThumbnailError> {
        match self {
            LocatorMode::Direct => Url::parse(text).map_err(|source| ThumbnailError::InvalidLocator {
                text: text.to_string(),
                source,
            }),
            LocatorMode::Sprite(base) => {
                let mut locator = base.clone();
                if let Some(fragment) = SPRITE_FRAGMENT_REGEX.find(text) {
                    locator.set_fragment(Some(&fragment.as_str()[1..]));
                }
                Ok(locator)
            }
        }
    }
}

/// Thumbnail derived from one cue
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailEntry {
    pub start_time: f64,
    pub end_time: f64,
    pub locator: Url,
}

impl ThumbnailEntry {
    /// Sprite rectangle carried by the locator, `None` for a full-frame image
    pub fn region(&self) -> Option<RegionFragment> {
        RegionFragment::from_locator(&self.locator)
    }
}

/// Ordered thumbnails with nearest-start-time lookup
#[derive(Debug, Clone, Default)]
pub struct ThumbnailIndex {
    entries: Vec<ThumbnailEntry>,
}

impl ThumbnailIndex {
    /// Build an index with one entry per cue, in cue order.
    pub fn build(cues: &[CueRecord], options: &IndexOptions) -> Result<Self, ThumbnailError> {
        let mode = options.locator_mode()?;

        let entries = cues
            .iter()
            .map(|cue| -> Result<ThumbnailEntry, ThumbnailError> {
                Ok(ThumbnailEntry {
                    start_time: cue.start_time,
                    end_time: cue.end_time,
                    locator: mode.resolve(&cue.text)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if entries.is_empty() {
            warn!("Thumbnail index built without any cues");
        } else {
            debug!("Built thumbnail index with {} entries", entries.len());
        }

        Ok(Self { entries })
    }

    /// Parse cue text and build an index from it in one step
    pub fn open_vtt(text: &str, options: &IndexOptions) -> Result<Self, AppError> {
        let cues = cue_parser::parse_cues(text)?;
        Ok(Self::build(&cues, options)?)
    }

    /// Entry whose start time is closest to `query_time` (seconds).
    ///
    /// Equally close entries resolve to the one that comes first. A NaN
    /// query compares unequal to everything and yields the first entry.
    pub fn nearest_entry(&self, query_time: f64) -> Option<&ThumbnailEntry> {
        let mut entries = self.entries.iter();
        let first = entries.next()?;

        let mut best = first;
        let mut best_distance = (first.start_time - query_time).abs();

        for entry in entries {
            let distance = (entry.start_time - query_time).abs();
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }

        Some(best)
    }

    /// Locator of the nearest thumbnail, `None` when the index is empty
    pub fn nearest_locator(&self, query_time: f64) -> Option<&Url> {
        self.nearest_entry(query_time).map(|entry| &entry.locator)
    }

    pub fn entries(&self) -> &[ThumbnailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
