pub mod limits {

    /// Organic terms appended after the curated popular-searches list.
    pub const TOP_ORGANIC_TERMS: u64 = 3;

    /// Hard cap on the popular-searches response.
    pub const MAX_POPULAR_TERMS: usize = 5;
}

pub mod menu {

    pub const WIKI_SLUG_PREFIX: &str = "wiki/";

    pub const NEWS_SLUG_PREFIX: &str = "tin-tuc/";
}
