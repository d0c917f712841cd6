//! Fixed locators of the "classic" category template

/// Links to character pages on a category listing page
pub const LISTING_ITEM: &str = "a.category-page__member-link";

/// Pagination control leading to the next listing page
pub const NEXT_PAGE: &str = "a.category-page__pagination-next";

/// Attribute that keys each infobox row
pub const DATA_SOURCE_ATTR: &str = "data-source";

/// Value cell nested inside an infobox row
pub const INFOBOX_VALUE: &str = ".pi-data-value";

/// Listing rows whose lower-cased text contains any of these are not characters
pub const BANNED_SUBSTRINGS: &[&str] = &[
    "category:",
    "catégorie:",
    "template:",
    "modèle:",
    "file:",
    "user blog:",
    "list of",
];
