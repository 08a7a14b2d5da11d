pub mod affix_locator;
mod affix_names;
pub mod name_section;
pub mod properties;
pub mod sections;
pub mod stats_section;

pub use affix_locator::{AffixLayout, AffixLocator};
pub use name_section::NameSection;
pub use properties::{PropertyKey, PropertyMap};
pub use sections::{split_sections, Section, SEPARATOR};
pub use stats_section::StatsSection;
