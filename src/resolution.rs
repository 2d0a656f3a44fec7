//! Frame resolutions.

use std::fmt;

/// Resolution (`width x height`) of a camera frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// 720p resolution: `1280x720`
    pub const RES_720P: Self = Self {
        width: 1280,
        height: 720,
    };

    /// 480p resolution: `640x480`, the default capture size of most webcams.
    pub const RES_480P: Self = Self {
        width: 640,
        height: 480,
    };

    /// Creates a new [`Resolution`] of `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width of this [`Resolution`].
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of this [`Resolution`].
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps normalized `[0.0, 1.0]` coordinates to pixel coordinates.
    ///
    /// Coordinates outside of the unit range map to pixels outside of the frame; they are not
    /// clamped. Fractional pixels are truncated toward zero.
    pub fn to_pixel(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x * self.width as f32) as i32,
            (y * self.height as f32) as i32,
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel() {
        let res = Resolution::RES_480P;
        assert_eq!(res.to_pixel(0.0, 0.0), (0, 0));
        assert_eq!(res.to_pixel(0.5, 0.5), (320, 240));
        assert_eq!(res.to_pixel(0.999, 0.999), (639, 479));

        // out-of-frame landmarks stay out of frame
        assert_eq!(res.to_pixel(1.5, -0.25), (960, -120));
    }

    #[test]
    fn test_display() {
        assert_eq!(Resolution::RES_720P.to_string(), "1280x720");
        assert_eq!(format!("{:?}", Resolution::new(3, 2)), "3x2");
    }
}
