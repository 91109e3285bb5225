use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Xywh};

/// Contains (x,y) of the center and (width,height) of bbox, all in frame pixels
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: String,
}

impl Detection {
    pub fn new(class: impl Into<String>, x: f32, y: f32, w: f32, h: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            confidence,
            class: class.into(),
        }
    }

    /// Confidence within `[0, 1]` and finite geometry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence) && self.bbox().is_finite()
    }

    #[inline(always)]
    pub fn bbox(&self) -> BBox<Xywh> {
        BBox::xywh(self.x, self.y, self.w, self.h)
    }
}
