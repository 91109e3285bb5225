use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat>([f32; 4], PhantomData<F>);

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl BBox<Ltrb> {
    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], Default::default())
    }

    #[inline(always)]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    /// Exponential low-pass step toward `sample`: every field becomes
    /// `self * (1 - alpha) + sample * alpha`.
    #[inline]
    pub fn lerp(&self, sample: &BBox<Xywh>, alpha: f32) -> Self {
        let curr = na::Vector4::from(self.0);
        let next = curr.lerp(&na::Vector4::from(sample.0), alpha);

        BBox([next.x, next.y, next.z, next.w], Default::default())
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        let (w2, h2) = (v.0[2] / 2.0, v.0[3] / 2.0);

        Self(
            [v.0[0] - w2, v.0[1] - h2, v.0[0] + w2, v.0[1] + h2],
            Default::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_weights_newest_sample_by_alpha() {
        let filtered = BBox::xywh(100.0, 50.0, 40.0, 20.0);
        let sample = BBox::xywh(200.0, 50.0, 60.0, 30.0);

        let next = filtered.lerp(&sample, 0.3);

        assert_relative_eq!(next.cx(), 130.0, epsilon = 1e-4);
        assert_relative_eq!(next.cy(), 50.0, epsilon = 1e-4);
        assert_relative_eq!(next.width(), 46.0, epsilon = 1e-4);
        assert_relative_eq!(next.height(), 23.0, epsilon = 1e-4);
    }

    #[test]
    fn lerp_with_unit_alpha_takes_sample() {
        let filtered = BBox::xywh(1.0, 2.0, 3.0, 4.0);
        let sample = BBox::xywh(10.0, 20.0, 30.0, 40.0);

        assert_eq!(filtered.lerp(&sample, 1.0), sample);
    }

    #[test]
    fn edges_from_center_format() {
        let ltrb = BBox::xywh(320.0, 240.0, 100.0, 60.0).as_ltrb();

        assert_relative_eq!(ltrb.left(), 270.0);
        assert_relative_eq!(ltrb.right(), 370.0);
        assert_relative_eq!(ltrb.top(), 210.0);
        assert_relative_eq!(ltrb.bottom(), 270.0);
    }

    #[test]
    fn non_finite_values_are_detected() {
        assert!(BBox::xywh(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!BBox::xywh(f32::NAN, 2.0, 3.0, 4.0).is_finite());
        assert!(!BBox::xywh(1.0, 2.0, f32::INFINITY, 4.0).is_finite());
    }
}
