//! PNG export of the canvas.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use hand_canvas::Canvas;
use image::RgbImage;
use tracing::info;

use crate::error::AppError;

/// Write `canvas` to `<dir>/drawing_<unix-seconds>.png`, creating `dir` if
/// needed.  Returns the written path.
pub fn save_canvas(canvas: &Canvas, dir: &Path) -> Result<PathBuf, AppError> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    save_canvas_as(canvas, &dir.join(format!("drawing_{secs}.png")))
}

pub fn save_canvas_as(canvas: &Canvas, path: &Path) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let fail = |reason: String| AppError::Save { path: path.to_path_buf(), reason };
    let img = RgbImage::from_raw(
        canvas.width() as u32,
        canvas.height() as u32,
        canvas.to_rgb_bytes(),
    )
    .ok_or_else(|| fail("pixel buffer does not match canvas size".into()))?;
    img.save(path).map_err(|e| fail(e.to_string()))?;

    info!(path = %path.display(), "canvas saved");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_canvas::BACKGROUND;

    #[test]
    fn saved_png_matches_canvas() {
        let dir = std::env::temp_dir().join(format!("gesture_draw_snap_{}", std::process::id()));
        let mut canvas = Canvas::new(40, 30);
        canvas.fill_rect(0, 0, 10, 10, 0xFFFF0000);

        let path = save_canvas(&canvas, &dir).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("drawing_"));
        assert_eq!(path.extension().unwrap(), "png");

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (40, 30));
        assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0]);
        let bg = [(BACKGROUND >> 16) as u8, (BACKGROUND >> 8) as u8, BACKGROUND as u8];
        assert_eq!(img.get_pixel(20, 20).0, bg);

        fs::remove_dir_all(&dir).ok();
    }
}
