// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a document and report its page geometry and page boxes
// using the `lopdf` crate. No content is rendered here.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use printready_core::error::{PrintreadyError, Result};
use printready_core::{PageGeometry, units};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Upper bound on /Parent hops when resolving inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A PDF rectangle in default user space, normalised so `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PdfRect {
    fn from_corners(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            x0: a.min(c),
            y0: b.min(d),
            x1: a.max(c),
            y1: b.max(d),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    fn intersect(&self, other: &Self) -> Option<Self> {
        let rect = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
    }
}

/// Page boxes as declared in the page dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBoxes {
    pub media: PdfRect,
    pub crop: Option<PdfRect>,
    pub trim: Option<PdfRect>,
    pub bleed: Option<PdfRect>,
}

/// Everything the reader knows about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_number: u32,
    pub geometry: PageGeometry,
    /// Effective /Rotate, normalised to 0, 90, 180 or 270.
    pub rotation: u16,
    pub boxes: PageBoxes,
}

/// Reads page geometry from existing PDF files.
///
/// The visible page area is the crop box clipped to the media box (the media
/// box alone when no crop box is set), scaled by /UserUnit, with width and
/// height swapped for pages rotated by 90 or 270 degrees.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PrintreadyError::Decode(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            PrintreadyError::Decode(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Geometry of a single page (1-indexed).
    pub fn geometry(&self, page_number: u32) -> Result<PageGeometry> {
        Ok(self.page_info(page_number)?.geometry)
    }

    /// Geometry, rotation and boxes of a single page (1-indexed).
    #[instrument(skip(self))]
    pub fn page_info(&self, page_number: u32) -> Result<PageInfo> {
        let pages = self.document.get_pages();
        let page_id: ObjectId = *pages
            .get(&page_number)
            .ok_or(PrintreadyError::PageOutOfRange {
                page: page_number,
                count: pages.len(),
            })?;
        self.read_page(page_number, page_id)
    }

    /// Information for every page, in document order.
    ///
    /// Pages whose boxes cannot be read are logged and left out.
    pub fn pages(&self) -> Vec<PageInfo> {
        self.document
            .get_pages()
            .into_iter()
            .filter_map(|(number, id)| match self.read_page(number, id) {
                Ok(info) => Some(info),
                Err(err) => {
                    warn!(page = number, %err, "Skipping page with unreadable boxes");
                    None
                }
            })
            .collect()
    }

    // -- Helpers --------------------------------------------------------------

    fn read_page(&self, page_number: u32, page_id: ObjectId) -> Result<PageInfo> {
        let page_err = |reason: String| PrintreadyError::Render {
            page: page_number,
            reason,
        };

        let page = self
            .document
            .get_dictionary(page_id)
            .map_err(|err| page_err(format!("cannot read page dictionary: {err}")))?;

        let media = self
            .inherited(page, b"MediaBox")
            .and_then(|obj| self.rect(obj))
            .ok_or_else(|| page_err("page has no usable /MediaBox".into()))?;
        let crop = self
            .inherited(page, b"CropBox")
            .and_then(|obj| self.rect(obj));
        let trim = page.get(b"TrimBox").ok().and_then(|obj| self.rect(obj));
        let bleed = page.get(b"BleedBox").ok().and_then(|obj| self.rect(obj));

        let rotation = self
            .inherited(page, b"Rotate")
            .and_then(|obj| self.resolve(obj).as_i64().ok())
            .map(|degrees| degrees.rem_euclid(360) as u16 / 90 * 90)
            .unwrap_or(0);

        let user_unit = page
            .get(b"UserUnit")
            .ok()
            .and_then(|obj| obj_to_f64(self.resolve(obj)))
            .filter(|unit| *unit > 0.0)
            .unwrap_or(1.0);

        let visible = crop.and_then(|c| c.intersect(&media)).unwrap_or(media);
        let (mut width_pt, mut height_pt) =
            (visible.width() * user_unit, visible.height() * user_unit);
        if rotation == 90 || rotation == 270 {
            std::mem::swap(&mut width_pt, &mut height_pt);
        }
        let geometry = PageGeometry::new(width_pt, height_pt)?;

        debug!(
            page_number,
            width_mm = units::points_to_mm(width_pt),
            height_mm = units::points_to_mm(height_pt),
            rotation,
            "Page geometry read"
        );

        Ok(PageInfo {
            page_number,
            geometry,
            rotation,
            boxes: PageBoxes {
                media,
                crop,
                trim,
                bleed,
            },
        })
    }

    /// Look up `key` on the page, then on its ancestors in the page tree.
    fn inherited<'a>(&'a self, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        let mut dict = page;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            let parent_id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
            dict = self.document.get_dictionary(parent_id).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(obj),
            other => other,
        }
    }

    fn rect(&self, obj: &Object) -> Option<PdfRect> {
        let arr = self.resolve(obj).as_array().ok()?;
        if arr.len() < 4 {
            return None;
        }
        let mut coords = [0.0f64; 4];
        for (slot, value) in coords.iter_mut().zip(arr) {
            *slot = obj_to_f64(self.resolve(value))?;
        }
        let rect = PdfRect::from_corners(coords[0], coords[1], coords[2], coords[3]);
        (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
    }
}

fn obj_to_f64(obj: &Object) -> Option<f64> {
    if let Ok(v) = obj.as_float() {
        return Some(f64::from(v));
    }
    obj.as_i64().ok().map(|v| v as f64)
}
