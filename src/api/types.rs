use serde::Serialize;

use crate::db::{FeaturedProject, MenuEntry};

/// Initial navigation payload. All six sections are always present; sale and
/// rent intentionally carry the same product-type list.
#[derive(Debug, Serialize)]
pub struct InitialMenuData {
    #[serde(rename = "duAn")]
    pub du_an: TypeSection,
    #[serde(rename = "muaBan")]
    pub mua_ban: TypeSection,
    #[serde(rename = "choThue")]
    pub cho_thue: TypeSection,
    pub wiki: TopicSection,
    #[serde(rename = "tinTuc")]
    pub tin_tuc: CategorySection,
    #[serde(rename = "doanhNghiep")]
    pub doanh_nghiep: TypeSection,
}

#[derive(Debug, Serialize)]
pub struct TypeSection {
    pub types: Vec<MenuEntry>,
}

#[derive(Debug, Serialize)]
pub struct TopicSection {
    pub topics: Vec<MenuEntry>,
}

#[derive(Debug, Serialize)]
pub struct CategorySection {
    pub categories: Vec<MenuEntry>,
}

#[derive(Debug, Serialize)]
pub struct DynamicMenuData {
    pub locations: Vec<MenuEntry>,
    pub featured: FeaturedSection,
}

/// `project` is serialized even when `None` so callers always see an
/// explicit null.
#[derive(Debug, Serialize)]
pub struct FeaturedSection {
    pub project: Option<FeaturedProject>,
}
