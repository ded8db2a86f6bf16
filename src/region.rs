/*!
 * Sprite region fragments.
 *
 * A thumbnail locator may end in `#xywh=x,y,w,h`, selecting a pixel
 * rectangle inside a larger sprite image. Locators without the fragment
 * address a standalone full-frame image.
 */

use std::fmt;
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use serde::Serialize;
use url::Url;

static XYWH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"xywh=([0-9]+),([0-9]+),([0-9]+),([0-9]+)").unwrap()
});

/// Pixel rectangle inside a sprite image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionFragment {
    /// Left offset in pixels
    pub x: u32,
    /// Top offset in pixels
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionFragment {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Find the first `xywh=` descriptor anywhere in `text`.
    ///
    /// Returns `None` when there is none or a component does not fit in `u32`.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = XYWH_REGEX.captures(text)?;
        Some(Self {
            x: caps[1].parse().ok()?,
            y: caps[2].parse().ok()?,
            width: caps[3].parse().ok()?,
            height: caps[4].parse().ok()?,
        })
    }

    /// Region encoded in the locator's fragment, if any
    pub fn from_locator(locator: &Url) -> Option<Self> {
        locator.fragment().and_then(Self::find_in)
    }
}

impl fmt::Display for RegionFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xywh={},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for RegionFragment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::find_in(s).ok_or_else(|| anyhow::anyhow!("Invalid region fragment: {}", s))
    }
}
