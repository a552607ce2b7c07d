use crate::archive::EpubArchive;
use crate::content;
use crate::error::{ExtractError, Result};
use crate::naming::ImageNamer;
use crate::navigation::{self, NCX_SUFFIX};
use crate::output::{self, ImageArchive};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cover stored at a fixed location by many EPUB producers.
pub const FIXED_COVER_ENTRY: &str = "image/cover.jpg";
/// Name of that cover inside the output archive.
pub const FIXED_COVER_NAME: &str = "cover.jpg";

/// Result of one successful run.
#[derive(Debug)]
pub struct Extraction {
    pub output: PathBuf,
    pub images: usize,
}

/// Extract the cover and chapter illustrations of `input` into a sibling
/// `_images.zip`.
#[tracing::instrument(skip_all, fields(file = %input.display()))]
pub fn extract_images(input: &Path) -> Result<Extraction> {
    let mut epub = EpubArchive::open(input)?;
    debug!(entries = epub.entry_names().len(), "opened archive");
    let references = reading_order(&mut epub)?;

    let mut images = ImageArchive::new();

    if epub.contains(FIXED_COVER_ENTRY) {
        let data = epub.read(FIXED_COVER_ENTRY)?;
        images.add(FIXED_COVER_NAME, &data)?;
    }

    let mut namer = ImageNamer::new();
    for document in &references {
        if !epub.contains(document) {
            debug!(document = %document, "content document not in archive, skipping");
            continue;
        }

        let markup = epub.read(document)?;
        let Some(image) = content::first_image(&markup) else {
            debug!(document = %document, "no image in content document");
            continue;
        };

        if !epub.contains(&image) {
            let missing = ExtractError::MissingReference { entry: image };
            debug!(document = %document, error = %missing, "skipping image");
            continue;
        }

        let name = namer.assign(&image);
        let data = epub.read(&image)?;
        if images.add(&name.to_string(), &data)? {
            debug!(source = %image, name = %name, "extracted image");
        } else {
            debug!(source = %image, name = %name, "name already used, skipping image");
        }
    }

    // The source archive is no longer needed once every entry is copied.
    drop(epub);

    let count = images.entry_count();
    let output = output::output_path(input);
    images.persist(&output)?;

    Ok(Extraction {
        output,
        images: count,
    })
}

/// Content documents listed by the navigation document, or none when the
/// book has no `.ncx` or it does not parse.
fn reading_order(epub: &mut EpubArchive) -> Result<Vec<String>> {
    let Some(ncx) = epub.find_by_suffix(NCX_SUFFIX).map(str::to_string) else {
        debug!("no navigation document");
        return Ok(Vec::new());
    };

    let data = epub.read(&ncx)?;
    match navigation::parse_navigation(&ncx, &data) {
        Ok(references) => {
            debug!(navigation = %ncx, count = references.len(), "parsed reading order");
            Ok(references)
        }
        Err(e) => {
            warn!(error = %e, "ignoring navigation document");
            Ok(Vec::new())
        }
    }
}
