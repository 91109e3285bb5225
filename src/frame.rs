use crate::detection::Detection;

pub struct Frame {
    pub dims: (u32, u32),
    pub detections: Vec<Detection>,
    pub ordinal: u64, // frame counter, not wall-clock
}

impl Frame {
    pub fn new(ordinal: u64, dims: (u32, u32), detections: Vec<Detection>) -> Self {
        Self {
            dims,
            detections,
            ordinal,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dims.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
