pub mod analyzer;
pub mod config;
pub mod data;
pub mod errors;
pub mod fetcher;
pub mod item_parser;
pub mod item_resolver;
pub mod models;
pub mod storage;

pub use config::Settings;
pub use data::PriceIndex;
pub use errors::{PricerError, Result};
pub use item_parser::ItemParser;
pub use item_resolver::{ItemResolver, Resolution};
pub use models::{Item, ItemType, Price, RemoteItem};
pub use storage::PriceCache;
