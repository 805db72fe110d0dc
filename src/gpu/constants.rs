//! GPU data layout and kernel constants.

/// Float stride for packed line data (`line_data`): `a, b, c, d, x0, y0, dx, dy`.
pub(crate) const LINE_STRIDE: u32 = 8;
/// Float stride for packed points (`points`).
pub(crate) const POINT_STRIDE: u32 = 2;
/// Word stride for packed pixel segments (`segments`): `lo, hi`.
pub(crate) const SEGMENT_WORDS: u32 = 2;

/// Order tag marking an inactive line slot.
pub(crate) const ORDER_NONE: u32 = 0xffff_ffffu32;
/// Word value of both halves of a padding segment.
pub(crate) const SEGMENT_SENTINEL: u32 = 0xffff_ffffu32;

/// Sub-pixel units per pixel, as a shift.
pub(crate) const SUBPIXEL_SHIFT: u32 = 4;
/// Tile width in pixels, as a shift.
pub(crate) const TILE_WIDTH_SHIFT: u32 = 4;
/// Tile height in pixels, as a shift.
pub(crate) const TILE_HEIGHT_SHIFT: u32 = 2;

/// Sub-pixel units per pixel, as a float divisor.
pub(crate) const SUBPIXELS_F32: f32 = (1 << SUBPIXEL_SHIFT) as f32;
/// Tile width in pixels, as a float divisor.
pub(crate) const TILE_WIDTH_F32: f32 = (1 << TILE_WIDTH_SHIFT) as f32;
/// Tile height in pixels, as a float divisor.
pub(crate) const TILE_HEIGHT_F32: f32 = (1 << TILE_HEIGHT_SHIFT) as f32;

/// Largest finite `f32`, used to detect infinite slopes inside kernels.
pub(crate) const F32_MAX: f32 = 3.402_823_5e38;
/// Dekker split factor for `f32`.
pub(crate) const SPLIT_FACTOR: f32 = 4097.0;

// Word "hi" layout.
pub(crate) const TILE_ROW_SHIFT: u32 = 19;
pub(crate) const TILE_ROW_BITS: u32 = 13;
pub(crate) const TILE_COL_SHIFT: u32 = 7;
pub(crate) const TILE_COL_BITS: u32 = 12;
pub(crate) const ORDER_HI_BITS: u32 = 7;

// Word "lo" layout.
pub(crate) const ORDER_LO_SHIFT: u32 = 18;
pub(crate) const ORDER_LO_BITS: u32 = 14;
pub(crate) const LOCAL_COL_SHIFT: u32 = 14;
pub(crate) const LOCAL_COL_BITS: u32 = 4;
pub(crate) const LOCAL_ROW_SHIFT: u32 = 12;
pub(crate) const LOCAL_ROW_BITS: u32 = 2;
pub(crate) const AREA_SHIFT: u32 = 6;
pub(crate) const AREA_BITS: u32 = 6;
pub(crate) const COVER_BITS: u32 = 6;

/// Width of the order field split across both words.
pub(crate) const ORDER_BITS: u32 = ORDER_HI_BITS + ORDER_LO_BITS;

pub(crate) const TILE_ROW_MASK: u32 = (1 << TILE_ROW_BITS) - 1;
pub(crate) const TILE_COL_MASK: u32 = (1 << TILE_COL_BITS) - 1;
pub(crate) const ORDER_HI_MASK: u32 = (1 << ORDER_HI_BITS) - 1;
pub(crate) const ORDER_LO_MASK: u32 = (1 << ORDER_LO_BITS) - 1;
pub(crate) const LOCAL_COL_MASK: u32 = (1 << LOCAL_COL_BITS) - 1;
pub(crate) const LOCAL_ROW_MASK: u32 = (1 << LOCAL_ROW_BITS) - 1;
pub(crate) const AREA_MASK: u32 = (1 << AREA_BITS) - 1;
pub(crate) const COVER_MASK: u32 = (1 << COVER_BITS) - 1;
