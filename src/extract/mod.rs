//! Extraction of character data from individual pages
//!
//! - `fields`: infobox fields and the image list
//! - `normalize`: annotation stripping for text values
//! - `metadata`: the numeric page id embedded in page scripts

mod fields;
mod metadata;
mod normalize;

pub use fields::{
    collect_image_sources, extract_infobox, extract_text_field, FieldExtractor, InfoboxData,
};
pub use metadata::{extract_page_id, page_id_in};
pub use normalize::strip_annotations;
