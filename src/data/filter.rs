use std::fmt;

use super::model::{Catalog, ContentType, TitleRecord};

// ---------------------------------------------------------------------------
// Content-type filter
// ---------------------------------------------------------------------------

/// The content-type selection scoping which titles a chart considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    TvShow,
}

impl TypeFilter {
    /// Every selectable value, in display order.
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Movie, TypeFilter::TvShow];

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Movie => "Movie",
            TypeFilter::TvShow => "TV Show",
        }
    }

    /// The single content type selected, or `None` for "All".
    pub fn content_type(self) -> Option<ContentType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Movie => Some(ContentType::Movie),
            TypeFilter::TvShow => Some(ContentType::TvShow),
        }
    }

    pub fn matches(self, content_type: ContentType) -> bool {
        self.content_type().map_or(true, |t| t == content_type)
    }
}

impl From<ContentType> for TypeFilter {
    fn from(t: ContentType) -> Self {
        match t {
            ContentType::Movie => TypeFilter::Movie,
            ContentType::TvShow => TypeFilter::TvShow,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Return indices of titles that pass the filter.
pub fn filtered_indices(catalog: &Catalog, filter: TypeFilter) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec.content_type))
        .map(|(i, _)| i)
        .collect()
}

/// Iterate over the titles that pass the filter.
pub fn filter_titles(catalog: &Catalog, filter: TypeFilter) -> impl Iterator<Item = &TitleRecord> {
    catalog
        .records
        .iter()
        .filter(move |rec| filter.matches(rec.content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec!["type".into(), "title".into()],
            vec![
                TitleRecord::new(ContentType::Movie, "Heat", 1995),
                TitleRecord::new(ContentType::TvShow, "Dark", 2017),
                TitleRecord::new(ContentType::Movie, "Ronin", 1998),
            ],
        )
    }

    #[test]
    fn all_keeps_every_title() {
        assert_eq!(filtered_indices(&catalog(), TypeFilter::All), vec![0, 1, 2]);
    }

    #[test]
    fn type_filters_select_matching_titles() {
        let catalog = catalog();
        assert_eq!(filtered_indices(&catalog, TypeFilter::Movie), vec![0, 2]);
        assert_eq!(filtered_indices(&catalog, TypeFilter::TvShow), vec![1]);

        let titles: Vec<&str> = filter_titles(&catalog, TypeFilter::TvShow)
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Dark"]);
    }

    #[test]
    fn labels_match_catalog_spelling() {
        let labels: Vec<&str> = TypeFilter::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["All", "Movie", "TV Show"]);
        assert_eq!(TypeFilter::from(ContentType::TvShow), TypeFilter::TvShow);
    }
}
