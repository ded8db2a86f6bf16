/*!
 * # seekthumbs - Seek bar thumbnails from WebVTT cues
 *
 * A Rust library that reads WebVTT-style thumbnail tracks and tells a
 * video player which preview image to show for a given seek position.
 *
 * ## Features
 *
 * - Lenient cue parsing (optional hours, `.` or `,` millisecond separator,
 *   cue ids, `NOTE` blocks and headers are skipped)
 * - Direct mode: every cue names its own thumbnail URL
 * - Legacy sprite mode: one sprite image, cues differ by `#xywh=` region
 * - Nearest-start-time lookup with a stable earliest-wins tie-break
 *
 * ## Architecture
 *
 * - `cue_parser`: cue text to `CueRecord`s
 * - `thumbnail_index`: locator derivation and nearest-thumbnail queries
 * - `region`: `xywh=` sprite region fragments
 * - `app_config`: configuration of the command line tool
 * - `file_utils`: file system helpers
 * - `errors`: error types
 *
 * ## Example
 *
 * ```
 * use seekthumbs::{IndexOptions, ThumbnailIndex};
 *
 * let vtt = "00:00.000 --> 00:05.000\nhttps://cdn.example/t0.jpg\n\n00:05.000 --> 00:10.000\nhttps://cdn.example/t1.jpg";
 * let index = ThumbnailIndex::open_vtt(vtt, &IndexOptions::direct()).unwrap();
 * let url = index.nearest_locator(6.2).unwrap();
 * assert_eq!(url.as_str(), "https://cdn.example/t1.jpg");
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod cue_parser;
pub mod errors;
pub mod file_utils;
pub mod region;
pub mod thumbnail_index;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cue_parser::{parse_cues, parse_timestamp, CueRecord};
pub use errors::{AppError, CueError, ThumbnailError};
pub use region::RegionFragment;
pub use thumbnail_index::{IndexOptions, ThumbnailEntry, ThumbnailIndex};
