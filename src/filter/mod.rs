pub mod soft;
pub mod units;

pub use soft::{PassThrough, RentBand, RentBandProxy, SoftFilterStrategy};
pub use units::{bedroom_count, filter_units, is_available_now, FilterStats, UnitFilter};
