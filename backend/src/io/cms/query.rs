//! Query-string grammar of the upstream content API.
//!
//! The API reads nested sort, populate, pagination and filter parameters
//! encoded with bracketed keys, e.g. `pagination[pageSize]=12` or
//! `filters[$or][0][customer][name][$contains]=amy`. The builder renders
//! key/value pairs; percent-encoding happens in the HTTP client.

/// Builder for one request's query pairs.
#[derive(Debug, Clone, Default)]
pub struct CmsQuery {
    pairs: Vec<(String, String)>,
    sorts: usize,
    filter_branches: usize,
}

impl CmsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sort directive such as `date:asc`.
    pub fn sort(mut self, directive: &str) -> Self {
        self.pairs
            .push((format!("sort[{}]", self.sorts), directive.to_string()));
        self.sorts += 1;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.pairs
            .push(("pagination[page]".to_string(), page.to_string()));
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.pairs
            .push(("pagination[pageSize]".to_string(), size.to_string()));
        self
    }

    /// Populate the customer relation together with its image url, the shape
    /// every invoice read uses.
    pub fn populate_customer_image(mut self) -> Self {
        self.pairs.push((
            "populate[customer][populate][image][fields][0]".to_string(),
            "url".to_string(),
        ));
        self
    }

    /// Restrict the populated fields at the top level.
    pub fn populate_fields(mut self, fields: &[&str]) -> Self {
        for (index, field) in fields.iter().enumerate() {
            self.pairs
                .push((format!("populate[fields][{}]", index), field.to_string()));
        }
        self
    }

    /// Add one `$contains` branch to the top-level `$or` filter. `path` is
    /// the attribute path within the filtered entity.
    pub fn or_contains(mut self, path: &[&str], term: &str) -> Self {
        let mut key = format!("filters[$or][{}]", self.filter_branches);
        for segment in path {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        key.push_str("[$contains]");
        self.pairs.push((key, term.to_string()));
        self.filter_branches += 1;
        self
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_query_shape() {
        let pairs = CmsQuery::new()
            .sort("date:asc")
            .page_size(12)
            .page(1)
            .into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("sort[0]".to_string(), "date:asc".to_string()),
                ("pagination[pageSize]".to_string(), "12".to_string()),
                ("pagination[page]".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_directives_are_indexed() {
        let pairs = CmsQuery::new().sort("date:asc").sort("id:desc").into_pairs();
        assert_eq!(pairs[0].0, "sort[0]");
        assert_eq!(pairs[1].0, "sort[1]");
    }

    #[test]
    fn test_populate_customer_image_path() {
        let pairs = CmsQuery::new().populate_customer_image().into_pairs();
        assert_eq!(
            pairs,
            vec![(
                "populate[customer][populate][image][fields][0]".to_string(),
                "url".to_string()
            )]
        );
    }

    #[test]
    fn test_populate_fields_are_indexed() {
        let pairs = CmsQuery::new().populate_fields(&["id", "name"]).into_pairs();
        assert_eq!(pairs[0], ("populate[fields][0]".to_string(), "id".to_string()));
        assert_eq!(pairs[1], ("populate[fields][1]".to_string(), "name".to_string()));
    }

    #[test]
    fn test_or_filter_branches_cover_nested_paths() {
        let pairs = CmsQuery::new()
            .or_contains(&["status"], "pen")
            .or_contains(&["amount"], "pen")
            .or_contains(&["customer", "name"], "pen")
            .or_contains(&["customer", "email"], "pen")
            .into_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "filters[$or][0][status][$contains]",
                "filters[$or][1][amount][$contains]",
                "filters[$or][2][customer][name][$contains]",
                "filters[$or][3][customer][email][$contains]",
            ]
        );
        assert!(pairs.iter().all(|(_, v)| v == "pen"));
    }
}
