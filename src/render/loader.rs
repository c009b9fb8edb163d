use std::path::Path;

use image::{ImageReader, RgbImage};

/// Outcome of trying to read one panel's source image
#[derive(Debug)]
pub(crate) enum LoadedImage {
    Image(RgbImage),
    Missing,
}

/// Open and decode the image at `path`.
///
/// The format is sniffed from the file contents, not the extension: the
/// host serves some images as GIF that are saved under a `.jpg` name.
/// Any failure is reported on stderr and turned into `Missing`.
pub(crate) fn load_image(path: &Path) -> LoadedImage {
    match decode(path) {
        Ok(img) => LoadedImage::Image(img),
        Err(e) => {
            eprintln!("ERROR: Can't load image at {}: {e}", path.display());
            LoadedImage::Missing
        }
    }
}

fn decode(path: &Path) -> Result<RgbImage, image::ImageError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgb8())
}
