//! iTunes category enrichment
//!
//! The edit form offers a single select whose values combine a top-level
//! iTunes category and an optional nested one as `top * 1000 + nested`.

/// Category columns derived from the form's combined code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySelection {
    pub topcategory: i32,
    pub nestedcategory: i32,
}

pub trait CategoryResolver: Send + Sync {
    fn resolve(&self, category: Option<i32>) -> CategorySelection;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItunesCategoryResolver;

impl ItunesCategoryResolver {
    const NESTED_SPAN: i32 = 1000;
    const MAX_CODE: i32 = 99_999;
}

impl CategoryResolver for ItunesCategoryResolver {
    fn resolve(&self, category: Option<i32>) -> CategorySelection {
        match category {
            Some(code) if (Self::NESTED_SPAN..=Self::MAX_CODE).contains(&code) => {
                CategorySelection {
                    topcategory: code / Self::NESTED_SPAN,
                    nestedcategory: code % Self::NESTED_SPAN,
                }
            }
            _ => CategorySelection::default(),
        }
    }
}
