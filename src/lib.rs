//! Study how colormaps travel through perceptual color spaces.
//!
//! A colormap is sampled on a dense uniform grid, consecutive samples
//! that produce the very same color (an artifact of the finite number
//! of displayable colors) are dropped and the remaining colors are
//! converted to a perceptual model, giving a [`Curve`].  Its
//! [`DerivativeCurve`] tells how fast the colormap moves in lightness,
//! chroma and hue.
//!
//! ```
//! use colormap_lens::{Curve, ExtractOptions, ColorRange, palettes};
//! use rgb::RGBA;
//! let viridis = palettes::colormap::<RGBA<f64>>("viridis")?;
//! let curve = Curve::extract(&viridis.quantized(256).sampled(),
//!                            &ExtractOptions::default())?;
//! assert_eq!(curve.len(), 256);
//! let dv = curve.differentiate()?;
//! assert_eq!(dv.len(), 255);
//! # Ok::<(), colormap_lens::Error>(())
//! ```
//!
//! Colormaps are anything implementing [`Colormap`]: closures mapping a
//! slice of parameters to colors, or any [`ColorRange`] (a [`Gradient`],
//! a [`PaletteGradient`], the [`Hue`] wheel,…) through
//! [`ColorRange::sampled`].

use std::f64::consts::PI;
use std::marker::PhantomData;
use palette::{convert::IntoColorUnclamped, white_point::D65,
              LabHue, LinSrgb, Srgb, Xyz};
use rgb::{RGB, RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod error;
mod model;
mod curve;
mod derivative;
pub mod palettes;

pub use error::{Error, Result};
pub use model::{convert, PerceptualModel};
pub use curve::{dedup, grid, Curve, ExtractOptions,
                DEDUP_TOLERANCE, DEFAULT_RESOLUTION};
pub use derivative::{DerivativeCurve, Summary};
pub use palettes::ty::PaletteType;

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Returns the colors corresponding to all `ts`, in order.
    fn sample(&self, ts: &[f64]) -> Vec<Color> {
        ts.iter().map(|&t| self.rgb(t)).collect()
    }

    /// Look the color up in a table of `levels` entries, as plotting
    /// libraries do: `t` is mapped to entry `⌊t · levels⌋` (the last
    /// entry for `t == 1.`) and entry `i` has the color of
    /// `i / (levels - 1)`.
    fn quantized(self, levels: usize) -> Quantized<Self, Color>
    where Self: Sized {
        Quantized { range: self, levels, color: PhantomData }
    }

    /// View the range as a [`Colormap`], evaluated over whole grids.
    fn sampled(self) -> Sampled<Self, Color>
    where Self: Sized {
        Sampled { range: self, color: PhantomData }
    }
}

/// A function evaluating colors on a whole grid of parameters at once.
///
/// Implemented for closures `Fn(&[f64]) -> Vec<C>` and, through
/// [`ColorRange::sampled`], for color ranges.
pub trait Colormap {
    /// Color encoding of the output.  The alpha channel, if any, is
    /// ignored by the analysis.
    type Color: RGBColor;

    /// Return one color per element of `q` (each in \[0, 1\]).
    fn eval(&self, q: &[f64]) -> Vec<Self::Color>;
}

impl<F, C> Colormap for F
where F: Fn(&[f64]) -> Vec<C>,
      C: RGBColor {
    type Color = C;

    #[inline]
    fn eval(&self, q: &[f64]) -> Vec<C> { self(q) }
}

/// A [`ColorRange`] seen as a [`Colormap`].
///
/// Created by [`ColorRange::sampled`].
pub struct Sampled<R, Color> {
    range: R,
    color: PhantomData<Color>,
}

impl<R, Color> Colormap for Sampled<R, Color>
where R: ColorRange<Color>, Color: RGBColor {
    type Color = Color;

    fn eval(&self, q: &[f64]) -> Vec<Color> { self.range.sample(q) }
}

/// A [`ColorRange`] evaluated through a lookup table.
///
/// Created by [`ColorRange::quantized`].
pub struct Quantized<R, Color> {
    range: R,
    levels: usize,
    color: PhantomData<Color>,
}

impl<R, Color> ColorRange<Color> for Quantized<R, Color>
where R: ColorRange<Color> {
    fn rgb(&self, t: f64) -> Color {
        if self.levels <= 1 { return self.range.rgb(0.) }
        let last = self.levels - 1;
        // `as usize` saturates, NaN giving 0.
        let i = ((t.clamp(0., 1.) * self.levels as f64) as usize).min(last);
        self.range.rgb(i as f64 / last as f64)
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return the color corresponding to the hue `h` ∈ \[0., 1.\].
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use colormap_lens::{RGBColor, ColorRange};
    /// let rgb = RGB8::HUE.rgb(0.5);
    /// ```
    const HUE: Hue<Self> = Hue { color: PhantomData };

    /// The linear ramp from black to white.
    const GRAY: Gray<Self> = Gray { color: PhantomData };

    /// Return a gradient from color `c0` to color `c1`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use colormap_lens::{RGBColor, ColorRange};
    /// let red = RGB8::new(255,0, 0);
    /// let blue = RGB8::new(0, 0, 255);
    /// let grad = red.gradient(&blue);
    /// let rgb = grad.rgb(0.5);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lch0 = Lch::from_rgb(Self::to_rgba(self));
        let lch1 = Lch::from_rgb(Self::to_rgba(c1));
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh, a: lch1.a - lch0.a },
                   color: PhantomData }
    }

    /// Matplotlib magma color scheme.
    #[inline]
    fn magma() -> Palette<Self> { Palette::new(&palettes::MAGMA) }

    /// Matplotlib inferno color scheme.
    #[inline]
    fn inferno() -> Palette<Self> { Palette::new(&palettes::INFERNO) }

    /// Matplotlib plasma color scheme.
    #[inline]
    fn plasma() -> Palette<Self> { Palette::new(&palettes::PLASMA) }

    /// Matplotlib viridis color scheme.
    #[inline]
    fn viridis() -> Palette<Self> { Palette::new(&palettes::VIRIDIS) }

    /// Matplotlib cividis color scheme.
    #[inline]
    fn cividis() -> Palette<Self> { Palette::new(&palettes::CIVIDIS) }

    /// The sRGB triple of the color with channels in \[0, 1\], the
    /// alpha component being dropped.
    fn to_unit_rgb(&self) -> RGB<f64> {
        let RGBA { r, g, b, a: _ } = Self::to_rgba(self);
        RGB { r: r / 255., g: g / 255., b: b / 255. }
    }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r, g: self.g, b: self.b, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { RGB { r: c.r, g: c.g, b: c.b } }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8 }
    }
}

/// 16 bits channels are rescaled from \[0, 65535\].
const U16_TO_U8: f64 = 255. / 65535.;

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 * U16_TO_U8, g: self.g as f64 * U16_TO_U8,
              b: self.b as f64 * U16_TO_U8, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        let u16 = |x: f64| (x / U16_TO_U8).round() as u16;
        RGB16 { r: u16(c.r),  g: u16(c.g),  b: u16(c.b) }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8, a: c.a as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 * U16_TO_U8, g: self.g as f64 * U16_TO_U8,
              b: self.b as f64 * U16_TO_U8, a: self.a as f64 * U16_TO_U8 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        let u16 = |x: f64| (x / U16_TO_U8).round() as u16;
        RGBA16 { r: u16(c.r),  g: u16(c.g),  b: u16(c.b), a: u16(c.a) }
    }
}

/// Polar CIE L*a*b* coordinates (D65 white point) plus alpha, the
/// space in which gradients are interpolated.  The hue is in radians.
#[derive(Clone, Copy)]
struct Lch {
    l: f64,
    c: f64,
    h: f64,
    /// Alpha component
    a: f64,
}

const TWO_PI: f64 = 2. * PI;

impl Lch {
    fn from_rgb(c: RGBA<f64>) -> Lch {
        let lin: LinSrgb<f64> =
            Srgb::new(c.r / 255., c.g / 255., c.b / 255.).into_linear();
        let xyz: Xyz<D65, f64> = lin.into_color_unclamped();
        let p: palette::Lch<D65, f64> = xyz.into_color_unclamped();
        Lch { l: p.l, c: p.chroma, h: p.hue.into_positive_radians(), a: c.a }
    }

    fn to_rgb(&self) -> RGBA<f64> {
        let p = palette::Lch::<D65, f64>::new(self.l, self.c,
                                               LabHue::from_radians(self.h));
        let xyz: Xyz<D65, f64> = p.into_color_unclamped();
        let lin: LinSrgb<f64> = xyz.into_color_unclamped();
        // Interpolated colors may leave the gamut slightly.
        let lin = LinSrgb::new(lin.red.clamp(0., 1.), lin.green.clamp(0., 1.),
                               lin.blue.clamp(0., 1.));
        let c: Srgb<f64> = Srgb::from_linear(lin);
        RGBA { r: 255. * c.red, g: 255. * c.green, b: 255. * c.blue,
               a: self.a }
    }
}

/// Hue
///
pub struct Hue<Color> { color: PhantomData<Color> }

impl<Color: RGBColor> ColorRange<Color> for Hue<Color> {
    fn rgb(&self, t: f64) -> Color {
        let t = 6. * t;
        let f = 255. * t.fract();
        let ti = t.trunc().rem_euclid(6.);
        let rgba = {
            if ti == 0.      { RGBA{ r: 255., g: f,     b: 0.,      a: 255.} }
            else if ti == 1. { RGBA{ r: 255. - f, g: 255., b: 0.,   a: 255.} }
            else if ti == 2. { RGBA{ r: 0.,   g: 255.,  b: f,       a: 255.} }
            else if ti == 3. { RGBA{ r: 0.,   g: 255. - f, b: 255., a: 255.} }
            else if ti == 4. { RGBA{ r: f,    g: 0.,    b: 255.,    a: 255.} }
            else             { RGBA{ r: 255., g: 0.,    b: 255. - f, a: 255.} }
        };
        Color::from_rgba(rgba)
    }
}

/// Gray ramp, linear in sRGB values.
pub struct Gray<Color> { color: PhantomData<Color> }

impl<Color: RGBColor> ColorRange<Color> for Gray<Color> {
    fn rgb(&self, t: f64) -> Color {
        let x = 255. * t.clamp(0., 1.);
        Color::from_rgba(RGBA{ r: x, g: x, b: x, a: 255. })
    }
}


/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - fist color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    fn rgb_unsafe(&self, t: f64) -> Color {
        let lhc = Lch { l: self.c0.l + t * self.dc.l,
              c: self.c0.c + t * self.dc.c,
              h: self.c0.h + t * self.dc.h,
              a: self.c0.a + t * self.dc.a };
        Color::from_rgba(lhc.to_rgb())
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unsafe(t.clamp(0., 1.)) }
}


/// A list of colors (aka colormap) with a name and a type.
#[derive(Clone, Copy)]
pub struct Palette<Color> {
    palette: &'static palettes::ty::PaletteData,
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Palette<Color> {
    pub(crate) fn new(palette: &'static palettes::ty::PaletteData) -> Self {
        Self { palette, color: PhantomData }
    }
}

/// # Color palettes (aka colormaps)
///
/// A Colormap with certain characteristics.
impl<Color> Palette<Color>
where Color: RGBColor {
    /// The name under which [`palettes::colormap`] finds the palette.
    pub fn name(&self) -> &'static str { self.palette.name }

    /// Returns the number of colors in the palette.
    ///
    /// Palettes countains at least 2 colors.
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Says whether the palette is `Seq`uential, `Div`ergent or
    /// `Qual`itative.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// Returns the RGB colors of the palette.
    pub fn colors(&self) -> Vec<Color> {
        self.palette.rgb.iter().map(|&c| Color::from_rgba(c)).collect()
    }

    /// Returns a gradient constructed from the palette.
    /// It only makes sense for sequential and some diverging palettes.
    pub fn gradient(&self) -> PaletteGradient<Color> {
        PaletteGradient {
            gradients: self.palette.rgb.windows(2)
                .map(|c| { let c0 = Color::from_rgba(c[0]);
                           let c1 = Color::from_rgba(c[1]);
                           c0.gradient(&c1) })
                .collect() }
    }
}

/// A gradient based on a [`Palette`].
pub struct PaletteGradient<Color> {
    gradients: Vec<Gradient<Color>>,
}

impl<Color> ColorRange<Color> for PaletteGradient<Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.gradients.len();
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb_unsafe(tn.fract()) }
        else { self.gradients[n-1].rgb_unsafe(1.) }
    }
}
