//! Server page protocol.
//!
//! In server mode the table only tracks the desired page; the caller turns
//! that state into a REST request with [`PageRequest`] and feeds the decoded
//! [`PageResponse`] back through `set_data` and `set_page_count`.
//!
//! # Query string
//!
//! | Parameter | Source |
//! |-----------|--------|
//! | `page` | 1-based page number |
//! | `limit` | page size |
//! | `sort` | `column:asc,column:desc`, primary first |
//! | `filter[column]` | text or exact value; repeated once per selected facet value |
//! | `filter[column][from]` / `[to]` | RFC 3339 date range bounds |

use serde::Deserialize;
use serde::Serialize;
use url::Url;
use url::form_urlencoded;

use crate::error::QueryError;
use crate::model::TableRow;
use crate::state::FilterEntry;
use crate::state::FilterValue;
use crate::state::PaginationState;
use crate::state::SortingEntry;
use crate::table::DataTable;

/// A request for one page of a server-paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    /// Rows per page.
    pub limit: usize,
    /// Sort entries, primary first.
    pub sort: Vec<SortingEntry>,
    /// Active filters.
    pub filters: Vec<FilterEntry>,
}

impl PageRequest {
    /// Creates a request for a pagination state with no sort or filters.
    pub fn new(pagination: PaginationState) -> Self {
        Self {
            page: pagination.page_index.saturating_add(1),
            limit: pagination.page_size,
            sort: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Returns the request's query parameters in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];

        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|entry| format!("{}:{}", entry.column_id, entry.direction().as_str()))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("sort".to_string(), sort));
        }

        for entry in &self.filters {
            let key = format!("filter[{}]", entry.column_id);
            match &entry.value {
                FilterValue::Text(text) => pairs.push((key, text.clone())),
                FilterValue::Faceted(values) => {
                    for value in values {
                        pairs.push((key.clone(), value.clone()));
                    }
                }
                FilterValue::Exact(value) => pairs.push((key, value.to_string())),
                FilterValue::DateRange(range) => {
                    if let Some(from) = range.from {
                        pairs.push((format!("{}[from]", key), from.to_rfc3339()));
                    }
                    if let Some(to) = range.to {
                        pairs.push((format!("{}[to]", key), to.to_rfc3339()));
                    }
                }
            }
        }

        pairs
    }

    /// Renders the percent-encoded query string (without a leading `?`).
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Appends the request to a resource URL such as
    /// `https://api.example.com/v1/kits`.
    pub fn to_url(&self, base: &str) -> Result<Url, QueryError> {
        let mut url = Url::parse(base)?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}

/// One page of a list as returned by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The rows of this page.
    pub entities: Vec<T>,
    /// Total rows across all pages.
    pub total: usize,
    /// 1-based page number of this page.
    #[serde(default)]
    pub page: Option<usize>,
    /// Total pages, if the server reports it.
    #[serde(default)]
    pub pages: Option<usize>,
}

impl<T: for<'de> Deserialize<'de>> PageResponse<T> {
    /// Decodes a response body.
    pub fn from_json(body: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl<T> PageResponse<T> {
    /// Returns the page count, derived from `total` when the server omits it.
    pub fn page_count(&self, page_size: usize) -> usize {
        self.pages
            .unwrap_or_else(|| self.total.div_ceil(page_size.max(1)))
    }
}

impl<T: TableRow> DataTable<T> {
    /// Builds the request for the table's current page, sorting and filters.
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            sort: self.sorting().entries().to_vec(),
            filters: self.active_filters().to_vec(),
            ..PageRequest::new(self.pagination())
        }
    }

    /// Loads a server page into the table: replaces the rows and the page
    /// count.
    pub fn apply_page(&mut self, response: PageResponse<T>) {
        let page_count = response.page_count(self.pagination().page_size);
        self.set_data(response.entities);
        self.set_page_count(page_count);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::model::ColumnDef;
    use crate::model::Record;
    use crate::state::Sorting;
    use crate::table::TableOptions;

    #[test]
    fn test_query_string() {
        let request = PageRequest {
            sort: Sorting::desc("createdAt").then_asc("name").entries().to_vec(),
            filters: vec![
                FilterEntry::new("name", FilterValue::text("Acme & Co")),
                FilterEntry::new("status", FilterValue::faceted(["active", "paused"])),
            ],
            ..PageRequest::new(PaginationState { page_index: 2, page_size: 25 })
        };
        assert_eq!(
            request.to_query_string(),
            "page=3&limit=25&sort=createdAt%3Adesc%2Cname%3Aasc\
             &filter%5Bname%5D=Acme+%26+Co&filter%5Bstatus%5D=active&filter%5Bstatus%5D=paused"
        );
    }

    #[test]
    fn test_facet_values_with_commas_stay_separate() {
        let request = PageRequest {
            filters: vec![FilterEntry::new(
                "city",
                FilterValue::faceted(["Portland, OR", "Portland, ME"]),
            )],
            ..PageRequest::new(PaginationState::default())
        };
        let pairs = request.query_pairs();
        assert_eq!(
            &pairs[2..],
            &[
                ("filter[city]".to_string(), "Portland, OR".to_string()),
                ("filter[city]".to_string(), "Portland, ME".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_number_saturates() {
        let request = PageRequest::new(PaginationState {
            page_index: usize::MAX,
            page_size: 10,
        });
        assert_eq!(request.page, usize::MAX);
    }

    #[test]
    fn test_date_range_pairs() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let request = PageRequest {
            filters: vec![FilterEntry::new(
                "createdAt",
                FilterValue::date_range(Some(from), None),
            )],
            ..PageRequest::new(PaginationState::default())
        };
        assert_eq!(
            request.query_pairs()[2],
            (
                "filter[createdAt][from]".to_string(),
                "2024-01-01T00:00:00+00:00".to_string()
            )
        );
    }

    #[test]
    fn test_to_url() {
        let request = PageRequest::new(PaginationState::default());
        let url = request.to_url("https://api.example.com/v1/kits").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/kits?page=1&limit=10");
        assert!(matches!(
            request.to_url("not a url"),
            Err(QueryError::Url(_))
        ));
    }

    #[test]
    fn test_page_response() {
        let body = r#"{"entities": [{"_id": "k-1", "serial": "SN-1"}], "total": 42}"#;
        let response = PageResponse::<Record>::from_json(body).unwrap();
        assert_eq!(response.entities.len(), 1);
        assert_eq!(response.page_count(10), 5);

        let err = PageResponse::<Record>::from_json(r#"[{"_id": "k-1"}]"#).unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }

    #[test]
    fn test_apply_page() {
        let mut table = DataTable::new(
            TableOptions::new(Vec::<Record>::new(), vec![ColumnDef::field("serial")])
                .manual_pagination(true),
        );
        assert_eq!(table.page_count(), 0);
        table.set_text_filter("serial", "SN");
        table.set_page_index(1);

        let request = table.page_request();
        assert_eq!(request.page, 2);
        assert_eq!(request.filters.len(), 1);

        let body = r#"{"entities": [{"_id": "k-11", "serial": "SN-11"}], "total": 11, "pages": 2}"#;
        table.apply_page(PageResponse::from_json(body).unwrap());
        assert_eq!(table.page_count(), 2);
        assert_eq!(table.page_rows().len(), 1);
        assert!(!table.can_next_page());
    }
}
