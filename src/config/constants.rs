// Unit Conversion Constants
pub const MMBTU_PER_MWH_THERMAL: f64 = 3.412142;     // 1 MWh thermal = 3.412 MMBtu
pub const NG_MMBTU_PER_MCF: f64 = 1.036;             // pipeline-quality gas heat content

// MWh of gas -> million cubic feet
pub const NG_MWH_2_MMCF: f64 = MMBTU_PER_MWH_THERMAL / NG_MMBTU_PER_MCF / 1000.0;
pub const MWH_2_MMCF: f64 = NG_MWH_2_MMCF;

// $/MWh -> $/MMBTU
pub const MWH_PRICE_2_MMBTU_PRICE: f64 = 1.0 / MMBTU_PER_MWH_THERMAL;

// Figure Dimensions (pixels)
pub const FIG_WIDTH: u32 = 1400;
pub const FIG_HEIGHT: u32 = 500;

// The synthetic region holding the sum over all real regions
pub const SYSTEM_REGION: &str = "system";
