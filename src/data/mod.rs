mod price_index;

pub use price_index::PriceIndex;
