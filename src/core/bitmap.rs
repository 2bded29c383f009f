// CPU-side pixel buffers shared between their writer (timer or loader) and
// the frame loop that uploads them.

#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, row-major from the top-left.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

/// A bitmap plus the invalidation flag the uploader polls.
#[derive(Clone, Debug)]
pub struct BitmapSlot {
    bitmap: Option<Bitmap>,
    status: LoadStatus,
    dirty: bool,
}

impl Default for BitmapSlot {
    fn default() -> Self {
        Self::loading()
    }
}

impl BitmapSlot {
    pub fn loading() -> Self {
        Self {
            bitmap: None,
            status: LoadStatus::Loading,
            dirty: false,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Install new content and mark it for upload.
    pub fn replace(&mut self, bitmap: Bitmap) {
        self.bitmap = Some(bitmap);
        self.status = LoadStatus::Ready;
        self.dirty = true;
    }

    pub fn fail(&mut self) {
        self.status = LoadStatus::Failed;
    }

    /// Hand out content that needs uploading, clearing the flag.
    pub fn take_dirty(&mut self) -> Option<&Bitmap> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.bitmap.as_ref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HullMaterial {
    /// Solid placeholder shown until the texture arrives, and forever on failure.
    Placeholder,
    Textured,
}

#[inline]
pub fn hull_material_for(slot: &BitmapSlot) -> HullMaterial {
    match (slot.status(), slot.bitmap()) {
        (LoadStatus::Ready, Some(_)) => HullMaterial::Textured,
        _ => HullMaterial::Placeholder,
    }
}
