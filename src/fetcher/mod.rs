mod ninja_api;

pub use ninja_api::{
    all_documents,
    NinjaClient,
    Overview,
    CURRENCY_TYPES,
    ITEM_TYPES,
};
