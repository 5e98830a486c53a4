//! Built-in colormaps and their resolution by name.
//!
//! The matplotlib colormaps are given by 10 or 11 equally spaced
//! stops, Brewer schemes (see <http://colorbrewer2.org/>) by their 9
//! class (sequential) or 11 class (diverging) versions.  Between stops,
//! colors are interpolated in CIE Lch (see [`PaletteGradient`]).

use lazy_static::lazy_static;
use crate::{ColorRange, Gray, Hue, Palette, PaletteGradient, RGBColor};
use crate::error::{Error, Result};

pub(crate) mod ty;
use ty::*;

// Matplotlib palettes
lazy_static! {
    pub(crate) static ref VIRIDIS: PaletteData = PaletteData::from_hex(
        "viridis", PaletteType::Seq,
        &[0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e,
          0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b, 0xfde725]);
    pub(crate) static ref MAGMA: PaletteData = PaletteData::from_hex(
        "magma", PaletteType::Seq,
        &[0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f,
          0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d, 0xfcfdbf]);
    pub(crate) static ref INFERNO: PaletteData = PaletteData::from_hex(
        "inferno", PaletteType::Seq,
        &[0x000004, 0x160b39, 0x420a68, 0x6a176e, 0x932667, 0xbc3754,
          0xdd513a, 0xf37819, 0xfca50a, 0xf6d746, 0xfcffa4]);
    pub(crate) static ref PLASMA: PaletteData = PaletteData::from_hex(
        "plasma", PaletteType::Seq,
        &[0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786,
          0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26, 0xf0f921]);
    pub(crate) static ref CIVIDIS: PaletteData = PaletteData::from_hex(
        "cividis", PaletteType::Seq,
        &[0x00204d, 0x00336f, 0x39486b, 0x575d6d, 0x707173,
          0x8a8779, 0xa69d75, 0xc4b56c, 0xe4cf5b, 0xffea46]);
}

// Brewer colormaps
lazy_static! {
    static ref BLUES: PaletteData = PaletteData::from_hex(
        "blues", PaletteType::Seq,
        &[0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6,
          0x4292c6, 0x2171b5, 0x08519c, 0x08306b]);
    static ref GREENS: PaletteData = PaletteData::from_hex(
        "greens", PaletteType::Seq,
        &[0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476,
          0x41ab5d, 0x238b45, 0x006d2c, 0x00441b]);
    static ref GREYS: PaletteData = PaletteData::from_hex(
        "greys", PaletteType::Seq,
        &[0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696,
          0x737373, 0x525252, 0x252525, 0x000000]);
    static ref ORANGES: PaletteData = PaletteData::from_hex(
        "oranges", PaletteType::Seq,
        &[0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c,
          0xf16913, 0xd94801, 0xa63603, 0x7f2704]);
    static ref PURPLES: PaletteData = PaletteData::from_hex(
        "purples", PaletteType::Seq,
        &[0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8,
          0x807dba, 0x6a51a3, 0x54278f, 0x3f007d]);
    static ref REDS: PaletteData = PaletteData::from_hex(
        "reds", PaletteType::Seq,
        &[0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a,
          0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d]);
    static ref YLGNBU: PaletteData = PaletteData::from_hex(
        "ylgnbu", PaletteType::Seq,
        &[0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4,
          0x1d91c0, 0x225ea8, 0x253494, 0x081d58]);
    static ref YLORRD: PaletteData = PaletteData::from_hex(
        "ylorrd", PaletteType::Seq,
        &[0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c,
          0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026]);
    static ref RDBU: PaletteData = PaletteData::from_hex(
        "rdbu", PaletteType::Div,
        &[0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7,
          0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac, 0x053061]);
    static ref SPECTRAL: PaletteData = PaletteData::from_hex(
        "spectral", PaletteType::Div,
        &[0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf,
          0xe6f598, 0xabdda4, 0x66c2a5, 0x3288bd, 0x5e4fa2]);
    static ref PUOR: PaletteData = PaletteData::from_hex(
        "puor", PaletteType::Div,
        &[0x7f3b08, 0xb35806, 0xe08214, 0xfdb863, 0xfee0b6, 0xf7f7f7,
          0xd8daeb, 0xb2abd2, 0x8073ac, 0x542788, 0x2d004b]);
}

lazy_static! {
    static ref ALL_PALETTES: [&'static PaletteData; 16] = [
        &*VIRIDIS, &*MAGMA, &*INFERNO, &*PLASMA,
        &*CIVIDIS,
        &*BLUES, &*GREENS, &*GREYS, &*ORANGES,
        &*PURPLES, &*REDS, &*YLGNBU, &*YLORRD,
        &*RDBU, &*SPECTRAL, &*PUOR];
}

/// A colormap resolved by [`colormap`].
pub enum NamedColormap<Color> {
    /// Interpolated built-in palette.
    Palette(PaletteGradient<Color>),
    /// The HSV hue wheel.
    Hue(Hue<Color>),
    /// Gray ramp, linear in sRGB.
    Gray(Gray<Color>),
}

impl<Color: RGBColor> ColorRange<Color> for NamedColormap<Color> {
    fn rgb(&self, t: f64) -> Color {
        match self {
            NamedColormap::Palette(p) => p.rgb(t),
            NamedColormap::Hue(h) => h.rgb(t),
            NamedColormap::Gray(g) => g.rgb(t),
        }
    }
}

/// The names [`colormap`] resolves, with the type of the colormap.
pub fn names() -> Vec<(&'static str, PaletteType)> {
    ALL_PALETTES.iter().map(|p| (p.name, p.typ))
        .chain([("hue", PaletteType::Cyclic), ("gray", PaletteType::Seq)])
        .collect()
}

/// Resolve a colormap by name (case insensitive).  A trailing `_r`
/// is not understood: reversed colormaps are not provided.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use colormap_lens::{palettes, ColorRange};
/// let magma = palettes::colormap::<RGB8>("Magma")?;
/// let c = magma.rgb(0.5);
/// # Ok::<(), colormap_lens::Error>(())
/// ```
pub fn colormap<Color: RGBColor>(name: &str) -> Result<NamedColormap<Color>> {
    let key = name.to_ascii_lowercase();
    match key.as_str() {
        "hue" | "hsv" => return Ok(NamedColormap::Hue(Color::HUE)),
        "gray" | "grey" => return Ok(NamedColormap::Gray(Color::GRAY)),
        _ => (),
    }
    ALL_PALETTES.iter().find(|p| p.name == key)
        .map(|&p| NamedColormap::Palette(Palette::new(p).gradient()))
        .ok_or_else(|| Error::UnknownColormap(name.to_string()))
}
