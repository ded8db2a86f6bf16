/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use seekthumbs::errors::{AppError, CueError, ThumbnailError};

#[test]
fn test_cueError_malformedTimestamp_shouldDisplayCorrectly() {
    let error = CueError::MalformedTimestamp("00:6:00".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed timestamp"));
    assert!(display.contains("00:6:00"));
}

#[test]
fn test_thumbnailError_invalidLocator_shouldDisplayTextAndSource() {
    let error = ThumbnailError::InvalidLocator {
        text: "thumb.jpg".to_string(),
        source: url::ParseError::RelativeUrlWithoutBase,
    };
    let display = format!("{}", error);
    assert!(display.contains("thumb.jpg"));
    assert!(display.contains("relative URL without a base"));
    assert!(error.source().is_some());
}

#[test]
fn test_thumbnailError_invalidSpriteBaseUrl_shouldDisplayUrl() {
    let error = ThumbnailError::InvalidSpriteBaseUrl {
        url: "sprite.jpg".to_string(),
        source: url::ParseError::RelativeUrlWithoutBase,
    };
    assert!(error.to_string().contains("sprite.jpg"));
}

#[test]
fn test_appError_fromCueError_shouldWrapCorrectly() {
    let error: AppError = CueError::MalformedTimestamp("x".to_string()).into();
    assert!(matches!(error, AppError::Cue(_)));
    assert!(error.to_string().starts_with("Cue error"));
}

#[test]
fn test_appError_fromThumbnailError_shouldWrapCorrectly() {
    let error: AppError = ThumbnailError::InvalidLocator {
        text: String::new(),
        source: url::ParseError::EmptyHost,
    }
    .into();
    assert!(matches!(error, AppError::Thumbnail(_)));
}

#[test]
fn test_appError_fromIoAndAnyhow_shouldConvert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.vtt");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("missing.vtt")));

    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}
