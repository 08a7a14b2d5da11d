pub mod item;
pub mod item_type;
pub mod remote_item;

pub use item::{
    Item,
    ItemProps,
};

pub use item_type::{
    Influence,
    ItemCategory,
    ItemRarity,
    ItemType,
    WeaponKind,
};

pub use remote_item::{
    CurrencyDetail,
    Price,
    PriceDocument,
    RemoteItem,
};
