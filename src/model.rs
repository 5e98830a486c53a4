//! Perceptual color models and the batch conversion from sRGB.
//!
//! The color science is delegated to the [`palette`] crate.  This module
//! only decides which model to convert to and how the three components
//! are laid out.

use std::fmt;
use std::str::FromStr;
use palette::{convert::IntoColorUnclamped, white_point::D65,
              LinSrgb, Srgb, Xyz, Lab, Lch, Luv, Lchuv, Oklab, Oklch};
use rgb::RGB;
use tracing::debug;
use crate::error::{Error, Result};

/// A color model in which the sampled colors are expressed.
///
/// The CIE models use the D65 white point, the one of sRGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PerceptualModel {
    /// Björn Ottosson's Oklab: `L`, `a`, `b`.
    #[default]
    Oklab,
    /// Oklab in polar coordinates: `L`, `C`, `h` (degrees).
    Oklch,
    /// CIE L\*a\*b\*.
    CieLab,
    /// CIE L\*C\*h\*_ab, hue in degrees.
    CieLch,
    /// CIE L\*u\*v\*.
    CieLuv,
    /// CIE L\*C\*h\*_uv, hue in degrees.
    CieLchuv,
    /// CIE 1931 XYZ.  Not perceptually uniform, provided for reference.
    CieXyz,
}

impl PerceptualModel {
    /// All supported models.
    pub const ALL: [PerceptualModel; 7] = [
        PerceptualModel::Oklab, PerceptualModel::Oklch,
        PerceptualModel::CieLab, PerceptualModel::CieLch,
        PerceptualModel::CieLuv, PerceptualModel::CieLchuv,
        PerceptualModel::CieXyz];

    /// Canonical name of the model.
    pub fn name(self) -> &'static str {
        use PerceptualModel::*;
        match self {
            Oklab => "OKLab",
            Oklch => "OKLCh",
            CieLab => "CIE Lab",
            CieLch => "CIE LCHab",
            CieLuv => "CIE Luv",
            CieLchuv => "CIE LCHuv",
            CieXyz => "CIE XYZ",
        }
    }

    /// Names of the three components, in the order they are stored.
    pub fn axis_labels(self) -> [&'static str; 3] {
        use PerceptualModel::*;
        match self {
            Oklab | CieLab => ["L", "a", "b"],
            Oklch | CieLch | CieLchuv => ["L", "C", "h"],
            CieLuv => ["L", "u", "v"],
            CieXyz => ["X", "Y", "Z"],
        }
    }

    /// Whether the model has a lightness axis followed by two
    /// opponent axes (and may thus be turned into polar coordinates).
    pub fn is_opponent(self) -> bool {
        use PerceptualModel::*;
        matches!(self, Oklab | CieLab | CieLuv)
    }

    /// Whether the model is in polar form `L`, `C`, `h` (`h` in degrees).
    pub fn is_polar(self) -> bool {
        use PerceptualModel::*;
        matches!(self, Oklch | CieLch | CieLchuv)
    }

    /// The polar counterpart of an opponent model.
    pub(crate) fn polar(self) -> Option<PerceptualModel> {
        use PerceptualModel::*;
        match self {
            Oklab => Some(Oklch),
            CieLab => Some(CieLch),
            CieLuv => Some(CieLchuv),
            _ => None,
        }
    }
}

impl fmt::Display for PerceptualModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PerceptualModel {
    type Err = Error;

    /// Parse a model name.  Case, spaces, dashes and underscores are
    /// ignored, so “OKLab”, “oklab” and “CIE Lab” are all accepted.
    fn from_str(s: &str) -> Result<Self> {
        use PerceptualModel::*;
        let key: String = s.chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "oklab" => Ok(Oklab),
            "oklch" => Ok(Oklch),
            "cielab" | "lab" => Ok(CieLab),
            "cielch" | "cielchab" | "lch" | "lchab" => Ok(CieLch),
            "cieluv" | "luv" => Ok(CieLuv),
            "cielchuv" | "lchuv" => Ok(CieLchuv),
            "ciexyz" | "xyz" => Ok(CieXyz),
            _ => Err(Error::UnsupportedModel(s.to_string())),
        }
    }
}

/// Convert sRGB colors (channels in \[0, 1\]) to `model`.
///
/// The output is index aligned with `colors`.  Conversions are
/// unclamped: out of gamut inputs give out of range coordinates
/// instead of being silently folded back.
pub fn convert(colors: &[RGB<f64>], model: PerceptualModel) -> Vec<[f64; 3]> {
    debug!(n = colors.len(), %model, "converting from sRGB");
    colors.iter().map(|&c| convert_one(c, model)).collect()
}

fn convert_one(c: RGB<f64>, model: PerceptualModel) -> [f64; 3] {
    let lin: LinSrgb<f64> = Srgb::new(c.r, c.g, c.b).into_linear();
    let xyz: Xyz<D65, f64> = lin.into_color_unclamped();
    match model {
        PerceptualModel::Oklab => {
            let p: Oklab<f64> = xyz.into_color_unclamped();
            [p.l, p.a, p.b]
        }
        PerceptualModel::Oklch => {
            let p: Oklch<f64> = xyz.into_color_unclamped();
            [p.l, p.chroma, p.hue.into_positive_degrees()]
        }
        PerceptualModel::CieLab => {
            let p: Lab<D65, f64> = xyz.into_color_unclamped();
            [p.l, p.a, p.b]
        }
        PerceptualModel::CieLch => {
            let p: Lch<D65, f64> = xyz.into_color_unclamped();
            [p.l, p.chroma, p.hue.into_positive_degrees()]
        }
        PerceptualModel::CieLuv => {
            let p: Luv<D65, f64> = xyz.into_color_unclamped();
            [p.l, p.u, p.v]
        }
        PerceptualModel::CieLchuv => {
            let p: Lchuv<D65, f64> = xyz.into_color_unclamped();
            [p.l, p.chroma, p.hue.into_positive_degrees()]
        }
        PerceptualModel::CieXyz => [xyz.x, xyz.y, xyz.z],
    }
}
