//! Sampling of a colormap into a [`Curve`] of perceptual coordinates.

use std::f64::consts::TAU;
use rgb::RGB;
use tracing::{debug, warn};
use crate::{Colormap, RGBColor};
use crate::error::{Error, Result};
use crate::model::{convert, PerceptualModel};

/// Number of grid points used by default.  Dense enough that a run of
/// equal adjacent colors comes from the quantization of the colormap
/// and not from undersampling it.
pub const DEFAULT_RESOLUTION: usize = 10_000;

/// Default tolerance of [`dedup`], on the Euclidean distance between
/// sRGB triples with channels in \[0, 1\].
pub const DEDUP_TOLERANCE: f64 = 1e-7;

/// How [`Curve::extract`] samples a colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Model the colors are converted to.
    pub model: PerceptualModel,
    /// Number of points of the uniform grid on \[0, 1\].
    pub resolution: usize,
    /// Colors closer than this to their predecessor are dropped.
    pub tolerance: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions { model: PerceptualModel::default(),
                         resolution: DEFAULT_RESOLUTION,
                         tolerance: DEDUP_TOLERANCE }
    }
}

impl ExtractOptions {
    /// Use the perceptual model `model`.
    pub fn model(mut self, model: PerceptualModel) -> Self {
        self.model = model;
        self
    }

    /// Sample the colormap at `n` points.
    pub fn resolution(mut self, n: usize) -> Self {
        self.resolution = n;
        self
    }

    /// Set the deduplication tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }
}

/// Return `n` equally spaced points from `0.` to `1.`, both included.
///
/// ```
/// assert_eq!(colormap_lens::grid(5), [0., 0.25, 0.5, 0.75, 1.]);
/// ```
pub fn grid(n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![0.],
        _ => {
            let last = n - 1;
            let flast = last as f64;
            (0 .. n).map(|k| if k == last { 1. } else { k as f64 / flast })
                .collect()
        }
    }
}

/// Euclidean distance between two colors.
#[inline]
fn distance(c0: RGB<f64>, c1: RGB<f64>) -> f64 {
    let (dr, dg, db) = (c1.r - c0.r, c1.g - c0.g, c1.b - c0.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Return which colors to keep: the first one always, any other one
/// when its distance to the color immediately before it (kept or not)
/// exceeds `tolerance`.
///
/// ```
/// use rgb::RGB;
/// use colormap_lens::dedup;
/// let c = [RGB::new(0., 0., 0.), RGB::new(0., 0., 0.), RGB::new(1., 0., 0.)];
/// assert_eq!(dedup(&c, 1e-7), [true, false, true]);
/// ```
pub fn dedup(colors: &[RGB<f64>], tolerance: f64) -> Vec<bool> {
    if colors.is_empty() { return vec![] }
    let mut keep = Vec::with_capacity(colors.len());
    keep.push(true);
    // NaN distances are not `> tolerance`, such colors are dropped.
    keep.extend(colors.windows(2).map(|c| distance(c[0], c[1]) > tolerance));
    keep
}

/// A colormap sampled in a perceptual model.
///
/// The parameters, device colors and perceptual coordinates are index
/// aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub(crate) model: PerceptualModel,
    pub(crate) resolution: usize,
    pub(crate) parameters: Vec<f64>,
    pub(crate) device_colors: Vec<RGB<f64>>,
    pub(crate) perceptual_coords: Vec<[f64; 3]>,
}

impl Curve {
    /// Sample `colormap` on a uniform grid of `opts.resolution` points,
    /// drop the samples whose color repeats the previous one (see
    /// [`dedup`]) and convert the others to `opts.model`.
    ///
    /// The colormap is called once, on the whole grid, and is not
    /// called at all if the resolution is less than 2.
    pub fn extract<M>(colormap: &M, opts: &ExtractOptions) -> Result<Curve>
    where M: Colormap + ?Sized {
        let n = opts.resolution;
        if n <= 1 { return Err(Error::InvalidResolution(n)) }
        let q = grid(n);
        let colors = colormap.eval(&q);
        if colors.len() != n {
            return Err(Error::LengthMismatch { expected: n,
                                               found: colors.len() })
        }
        let colors: Vec<_> = colors.iter().map(RGBColor::to_unit_rgb).collect();
        let keep = dedup(&colors, opts.tolerance);
        let (parameters, device_colors): (Vec<f64>, Vec<RGB<f64>>) =
            q.into_iter().zip(colors).zip(keep)
            .filter_map(|(s, k)| k.then_some(s))
            .unzip();
        let kept = parameters.len();
        debug!(resolution = n, kept, "deduplicated samples");
        if 2 * kept < n {
            warn!(resolution = n, kept,
                  "more than half of the samples repeat their predecessor");
        }
        let perceptual_coords = convert(&device_colors, opts.model);
        Ok(Curve { model: opts.model, resolution: n,
                   parameters, device_colors, perceptual_coords })
    }

    /// Same as [`Curve::extract`] with the model given by its name
    /// (see [`PerceptualModel`]'s `FromStr`) and the default tolerance.
    pub fn extract_named<M>(colormap: &M, model: &str, resolution: usize)
                            -> Result<Curve>
    where M: Colormap + ?Sized {
        let model: PerceptualModel = model.parse()?;
        let opts = ExtractOptions::default().model(model).resolution(resolution);
        Self::extract(colormap, &opts)
    }

    /// Build a curve from index aligned arrays.  Only the lengths are
    /// checked.
    pub fn from_parts(model: PerceptualModel, parameters: Vec<f64>,
                      device_colors: Vec<RGB<f64>>,
                      perceptual_coords: Vec<[f64; 3]>) -> Result<Curve> {
        let n = parameters.len();
        for found in [device_colors.len(), perceptual_coords.len()] {
            if found != n {
                return Err(Error::LengthMismatch { expected: n, found })
            }
        }
        Ok(Curve { model, resolution: n,
                   parameters, device_colors, perceptual_coords })
    }

    /// Model of [`Curve::perceptual_coords`].
    pub fn model(&self) -> PerceptualModel { self.model }

    /// Number of grid points sampled (before deduplication).
    pub fn resolution(&self) -> usize { self.resolution }

    /// Number of samples.
    pub fn len(&self) -> usize { self.parameters.len() }

    /// Whether the curve has no sample.  Never the case for extracted
    /// curves.
    pub fn is_empty(&self) -> bool { self.parameters.is_empty() }

    /// Number of grid points dropped by the deduplication.
    pub fn dropped(&self) -> usize { self.resolution - self.len() }

    /// Parameters of the samples, increasing for extracted curves.
    pub fn parameters(&self) -> &[f64] { &self.parameters }

    /// sRGB colors of the samples, channels in \[0, 1\].
    pub fn device_colors(&self) -> &[RGB<f64>] { &self.device_colors }

    /// Coordinates of the samples in [`Curve::model`].
    pub fn perceptual_coords(&self) -> &[[f64; 3]] { &self.perceptual_coords }

    /// First component of the coordinates (the lightness, except for
    /// CIE XYZ).
    pub fn lightness(&self) -> Vec<f64> {
        self.perceptual_coords.iter().map(|v| v[0]).collect()
    }

    /// Distance of the coordinates to the lightness axis.  Fails with
    /// [`Error::UnsupportedModel`] for CIE XYZ, which has no such axis.
    pub fn chroma(&self) -> Result<Vec<f64>> {
        let polar = self.polar_axes()?;
        Ok(self.perceptual_coords.iter()
           .map(|v| if polar { v[1] } else { v[1].hypot(v[2]) })
           .collect())
    }

    /// Hue angle in radians, in \[0, 2π).  Fails with
    /// [`Error::UnsupportedModel`] for CIE XYZ.
    pub fn hue(&self) -> Result<Vec<f64>> {
        let polar = self.polar_axes()?;
        Ok(self.perceptual_coords.iter()
           .map(|v| if polar { v[2].to_radians() }
                    else { v[2].atan2(v[1]).rem_euclid(TAU) })
           .collect())
    }

    /// Whether the coordinates are already polar; an error if the model
    /// has no polar form.
    fn polar_axes(&self) -> Result<bool> {
        if self.model.is_polar() { Ok(true) }
        else if self.model.is_opponent() { Ok(false) }
        else { Err(Error::UnsupportedModel(self.model.to_string())) }
    }

    /// The same curve in the polar form `L`, `C`, `h` (degrees) of its
    /// model.  Fails with [`Error::UnsupportedModel`] for CIE XYZ.
    pub fn to_polar(&self) -> Result<Curve> {
        if self.model.is_polar() { return Ok(self.clone()) }
        let model = self.model.polar()
            .ok_or_else(|| Error::UnsupportedModel(self.model.to_string()))?;
        let perceptual_coords = self.perceptual_coords.iter().map(|v| {
            let h = v[2].atan2(v[1]).to_degrees().rem_euclid(360.);
            [v[0], v[1].hypot(v[2]), h]
        }).collect();
        Ok(Curve { model, perceptual_coords,
                   parameters: self.parameters.clone(),
                   device_colors: self.device_colors.clone(),
                   resolution: self.resolution })
    }
}
