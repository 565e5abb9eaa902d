use image::{GrayImage, Luma};

use crate::builder::QR;

/// Read-only view of a symbol, all a consumer needs to draw or export it.
pub trait ModuleGrid {
    /// Number of modules along one side.
    fn size(&self) -> usize;

    /// Whether the module at `row`, `col` is dark.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

impl ModuleGrid for QR {
    fn size(&self) -> usize {
        QR::size(self)
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        QR::is_dark(self, row, col)
    }
}

pub trait Render {
    type Output;

    fn render<G: ModuleGrid + ?Sized>(&self, grid: &G) -> Self::Output;
}

// Quiet zone in modules on each side
const QUIET_ZONE: usize = 4;

// Calls f with (row, col, dark) for every output cell including the quiet
// zone, each module repeated scale times in both directions
fn for_each_cell<G, F>(grid: &G, scale: usize, mut f: F)
where
    G: ModuleGrid + ?Sized,
    F: FnMut(usize, usize, bool),
{
    let qz_sz = QUIET_ZONE * scale;
    let qr_sz = grid.size() * scale;
    let total_sz = qz_sz + qr_sz + qz_sz;
    let symbol = qz_sz..qz_sz + qr_sz;
    for i in 0..total_sz {
        for j in 0..total_sz {
            let in_symbol = symbol.contains(&i) && symbol.contains(&j);
            let dark = in_symbol && grid.is_dark((i - qz_sz) / scale, (j - qz_sz) / scale);
            f(i, j, dark);
        }
    }
}

/// Renders to a grayscale image, black on white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRender {
    /// Pixels per module
    pub module_size: u32,
}

impl Default for ImageRender {
    fn default() -> Self {
        Self { module_size: 4 }
    }
}

impl Render for ImageRender {
    type Output = GrayImage;

    fn render<G: ModuleGrid + ?Sized>(&self, grid: &G) -> GrayImage {
        debug_assert!(self.module_size > 0, "Module size must be positive");

        let scale = self.module_size as usize;
        let total_sz = ((QUIET_ZONE * 2 + grid.size()) * scale) as u32;
        let mut canvas = GrayImage::new(total_sz, total_sz);
        for_each_cell(grid, scale, |i, j, dark| {
            let pixel = if dark { Luma([0]) } else { Luma([255]) };
            canvas.put_pixel(j as u32, i as u32, pixel);
        });
        canvas
    }
}

/// Renders to text, one line per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRender {
    /// Characters per module along each axis
    pub module_size: usize,
    pub dark: char,
    pub light: char,
}

// Inverted for terminals with dark backgrounds
impl Default for TextRender {
    fn default() -> Self {
        Self { module_size: 1, dark: ' ', light: '█' }
    }
}

impl Render for TextRender {
    type Output = String;

    fn render<G: ModuleGrid + ?Sized>(&self, grid: &G) -> String {
        debug_assert!(self.module_size > 0, "Module size must be positive");

        let total_sz = (QUIET_ZONE * 2 + grid.size()) * self.module_size;
        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for_each_cell(grid, self.module_size, |_, j, dark| {
            canvas.push(if dark { self.dark } else { self.light });
            if j == total_sz - 1 {
                canvas.push('\n');
            }
        });
        canvas
    }
}

impl QR {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        ImageRender { module_size: module_sz }.render(self)
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        TextRender { module_size: module_sz, ..TextRender::default() }.render(self)
    }
}
