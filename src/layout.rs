//! Product compositing layout.
//!
//! Computes where a cropped product cut-out lands on a background: scaled
//! to a share of the background width, capped at 75% of its height,
//! centred horizontally and kept clear of a bottom margin. Pixel work
//! (cropping, resampling, pasting) happens in the image tooling that
//! consumes the placement.

use serde::{Deserialize, Serialize};

use crate::error::{AssetError, Result};

/// Tallest the product may be, as a fraction of background height.
pub const MAX_HEIGHT_RATIO: f64 = 0.75;

/// Tunables passed by the storefront as JSON, e.g.
/// `{"productScale": 0.6, "yPosition": 0.2}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeParams {
    /// Product width as a fraction of background width.
    pub product_scale: f64,
    /// Top edge as a fraction of background height.
    pub y_position: f64,
    /// Bottom margin as a fraction of background height.
    pub padding_bottom: f64,
}

impl Default for CompositeParams {
    fn default() -> Self {
        CompositeParams {
            product_scale: 0.55,
            y_position: 0.15,
            padding_bottom: 0.10,
        }
    }
}

impl CompositeParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Target rectangle for the resized product, in background pixels.
/// `x` and `y` can be negative when the product overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Compute the placement of a `product` (cropped to its opaque bounds)
/// on a `background`. Sizes are `(width, height)`.
pub fn compute_placement(
    background: (u32, u32),
    product: (u32, u32),
    params: &CompositeParams,
) -> Result<Placement> {
    let (bg_w, bg_h) = background;
    let (prod_w, prod_h) = product;
    if bg_w == 0 || bg_h == 0 {
        return Err(AssetError::InvalidDimensions {
            what: "background",
            width: bg_w,
            height: bg_h,
        });
    }
    if prod_w == 0 {
        return Err(AssetError::InvalidDimensions {
            what: "product",
            width: prod_w,
            height: prod_h,
        });
    }

    for (name, value) in [
        ("productScale", params.product_scale),
        ("yPosition", params.y_position),
        ("paddingBottom", params.padding_bottom),
    ] {
        if !value.is_finite() {
            return Err(AssetError::InvalidParams(format!("{name} is {value}")));
        }
    }

    let bg_w_f = bg_w as f64;
    let bg_h_f = bg_h as f64;
    let aspect = prod_h as f64 / prod_w as f64;

    // Integer steps truncate toward zero; `x` alone floors.
    let mut width = (bg_w_f * params.product_scale).trunc();
    let mut height = (width * aspect).trunc();

    let max_height = (bg_h_f * MAX_HEIGHT_RATIO).trunc();
    if height > max_height {
        height = max_height;
        width = (height / aspect).trunc();
    }

    let width = to_extent("width", width)?;
    let height = to_extent("height", height)?;

    let x = ((bg_w_f - width as f64) / 2.0).floor();
    let mut y = (bg_h_f * params.y_position).trunc();

    let floor_line = bg_h_f * (1.0 - params.padding_bottom);
    if y + height as f64 > floor_line {
        y = (floor_line - height as f64).trunc();
    }

    Ok(Placement {
        x: to_coord("x", x)?,
        y: to_coord("y", y)?,
        width,
        height,
    })
}

/// Largest coordinate magnitude that f64 holds exactly.
const MAX_COORD: f64 = 9_007_199_254_740_992.0;

fn to_extent(what: &str, value: f64) -> Result<u32> {
    if (0.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(AssetError::InvalidParams(format!(
            "product {what} {value} is outside 0..={}",
            u32::MAX
        )))
    }
}

fn to_coord(what: &str, value: f64) -> Result<i64> {
    if value.abs() <= MAX_COORD {
        Ok(value as i64)
    } else {
        Err(AssetError::InvalidParams(format!(
            "product {what} {value} is out of range"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_product_on_landscape_background() {
        let p = compute_placement((1000, 800), (400, 400), &CompositeParams::default())
            .expect("placement failed");
        // 1000 × 0.55 = 550 wide, square so 550 tall (under the 600 cap).
        assert_eq!(
            p,
            Placement {
                x: 225,
                y: 120,
                width: 550,
                height: 550
            }
        );
    }

    #[test]
    fn tall_product_is_capped() {
        let p = compute_placement((1000, 1000), (100, 400), &CompositeParams::default())
            .expect("placement failed");
        // 550 wide would be 2200 tall; cap at 750, width 750 / 4 = 187.
        assert_eq!(p.height, 750);
        assert_eq!(p.width, 187);
        assert_eq!(p.x, 406);
        // Bottom edge lands exactly on the padding line.
        assert_eq!(p.y, 150);
    }

    #[test]
    fn wide_product_keeps_requested_top() {
        let p = compute_placement((1000, 1000), (400, 100), &CompositeParams::default())
            .expect("placement failed");
        assert_eq!((p.width, p.height), (550, 137));
        assert_eq!(p.y, 150);
    }

    #[test]
    fn oversized_scale_goes_negative() {
        let params = CompositeParams {
            product_scale: 1.51,
            ..CompositeParams::default()
        };
        let p = compute_placement((100, 1000), (10, 1), &params).expect("placement failed");
        // (100 - 151) / 2 floors to -26.
        assert_eq!(p.width, 151);
        assert_eq!(p.x, -26);
    }

    #[test]
    fn low_product_is_lifted_above_padding() {
        let params = CompositeParams {
            y_position: 0.5,
            ..CompositeParams::default()
        };
        let p = compute_placement((1000, 800), (400, 400), &params).expect("placement failed");
        // 400 + 550 > 720, so the top moves to 720 - 550.
        assert_eq!(p.y, 170);
    }

    #[test]
    fn params_defaults_from_partial_json() {
        let params = CompositeParams::from_json_str(r#"{"productScale": 0.6}"#)
            .expect("parse failed");
        assert_eq!(params.product_scale, 0.6);
        assert_eq!(params.y_position, 0.15);
        assert_eq!(params.padding_bottom, 0.10);
        assert_eq!(
            CompositeParams::from_json_str("{}").expect("parse failed"),
            CompositeParams::default()
        );
    }

    #[test]
    fn zero_width_product_rejected() {
        let err = compute_placement((100, 100), (0, 50), &CompositeParams::default());
        assert!(matches!(
            err,
            Err(AssetError::InvalidDimensions { what: "product", .. })
        ));
        assert!(compute_placement((0, 100), (10, 10), &CompositeParams::default()).is_err());
    }

    #[test]
    fn huge_y_position_is_lifted() {
        let params = CompositeParams {
            y_position: 1e20,
            ..CompositeParams::default()
        };
        let placement =
            compute_placement((100, 100), (10, 10), &params).expect("placement failed");
        // 100 * 0.9 - 55
        assert_eq!(placement.y, 35);
        assert_eq!(placement.height, 55);
    }

    #[test]
    fn unrepresentable_y_is_rejected() {
        let params = CompositeParams {
            y_position: -1e20,
            ..CompositeParams::default()
        };
        let err = compute_placement((100, 100), (10, 10), &params);
        assert!(matches!(err, Err(AssetError::InvalidParams(_))), "{err:?}");
    }

    #[test]
    fn negative_scale_is_rejected() {
        let params = CompositeParams {
            product_scale: -1e30,
            ..CompositeParams::default()
        };
        let err = compute_placement((100, 100), (10, 0), &params);
        assert!(matches!(err, Err(AssetError::InvalidParams(_))), "{err:?}");
    }

    #[test]
    fn width_beyond_u32_is_rejected() {
        let params = CompositeParams {
            product_scale: 1e8,
            ..CompositeParams::default()
        };
        // 1000 × 1e8 = 1e11 does not fit in a u32.
        let err = compute_placement((1000, 1000), (10, 0), &params);
        assert!(matches!(err, Err(AssetError::InvalidParams(_))), "{err:?}");
    }

    #[test]
    fn non_finite_params_are_rejected() {
        for params in [
            CompositeParams {
                product_scale: f64::NAN,
                ..CompositeParams::default()
            },
            CompositeParams {
                padding_bottom: f64::INFINITY,
                ..CompositeParams::default()
            },
        ] {
            let err = compute_placement((100, 100), (10, 10), &params);
            assert!(matches!(err, Err(AssetError::InvalidParams(_))), "{err:?}");
        }
    }
}
