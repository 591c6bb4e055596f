//! Paged export of search results
//!
//! A run first probes the search endpoint for the reported total, plans the
//! pages with [`PagePlan`], then walks every page, fetching per-business data
//! and writing one flattened row per business.

use crate::api::models::BearerToken;
use crate::core::records::{BusinessRow, ReviewRow};
use crate::core::source::BusinessSource;
use crate::core::writer::RowWriter;
use crate::error::ApiError;
use crate::utils::validation::MAX_RECORDS;
use std::io::Write;

/// Largest page the search endpoint serves
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub location: String,
    pub records: u32,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, location: impl Into<String>, records: u32) -> Self {
        Self {
            term: term.into(),
            location: location.into(),
            records,
        }
    }
}

/// One search window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub size: u32,
}

/// Page layout for a run: offsets advance by `page_size` while below `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub page_size: u32,
    pub limit: u32,
}

impl PagePlan {
    pub fn new(requested: u32, total: u64) -> Self {
        let (requested, page_size) = if requested > MAX_RECORDS {
            (MAX_RECORDS, MAX_PAGE_SIZE)
        } else if requested <= MAX_PAGE_SIZE {
            (requested, requested)
        } else {
            (requested, MAX_PAGE_SIZE)
        };
        let limit = u64::from(requested).min(total) as u32;

        Self { page_size, limit }
    }

    /// The last page is shortened so no more than `limit` rows are requested
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        (0u32..)
            .map(move |n| n * self.page_size)
            .take_while(move |offset| *offset < self.limit)
            .map(move |offset| Page {
                offset,
                size: self.page_size.min(self.limit - offset),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_available: u64,
    pub pages: usize,
    pub rows_written: usize,
    pub skipped: usize,
}

pub struct Exporter<'a, S: BusinessSource> {
    source: &'a S,
    token: &'a BearerToken,
}

impl<'a, S: BusinessSource> Exporter<'a, S> {
    pub fn new(source: &'a S, token: &'a BearerToken) -> Self {
        Self { source, token }
    }

    /// One row per business. A failed detail lookup skips that business only.
    pub async fn export_businesses<W: Write>(
        &self,
        query: &SearchQuery,
        writer: &mut RowWriter<W, BusinessRow>,
    ) -> crate::Result<ExportSummary> {
        let (plan, mut summary) = self.plan(query).await?;

        for page in plan.pages() {
            let ids = self.page_ids(query, page).await?;
            summary.pages += 1;

            for id in &ids {
                match self.source.business_details(self.token, id).await {
                    Ok(detail) => {
                        writer.write_record(&BusinessRow::from_detail(id, &detail))?;
                        summary.rows_written += 1;
                    }
                    Err(e) => {
                        log::warn!("Failed to fetch business details for {}: {}", id, e);
                        summary.skipped += 1;
                    }
                }
            }
        }

        log::info!(
            "Business export finished: {} rows, {} skipped, {} available",
            summary.rows_written,
            summary.skipped,
            summary.total_available
        );
        Ok(summary)
    }

    /// One row per business with its reviews. A failed detail or review lookup
    /// abandons the rest of the current page; the next page is still fetched.
    pub async fn export_reviews<W: Write>(
        &self,
        query: &SearchQuery,
        writer: &mut RowWriter<W, ReviewRow>,
    ) -> crate::Result<ExportSummary> {
        let (plan, mut summary) = self.plan(query).await?;

        for page in plan.pages() {
            let ids = self.page_ids(query, page).await?;
            summary.pages += 1;

            for (index, id) in ids.iter().enumerate() {
                let fetched = match self.source.business_details(self.token, id).await {
                    Ok(detail) => self
                        .source
                        .reviews(self.token, id)
                        .await
                        .map(|reviews| (detail, reviews))
                        .map_err(|e| ("reviews", e)),
                    Err(e) => Err(("business details", e)),
                };

                match fetched {
                    Ok((detail, reviews)) => {
                        writer.write_record(&ReviewRow::from_parts(id, &detail, &reviews))?;
                        summary.rows_written += 1;
                    }
                    Err((what, e)) => {
                        let abandoned = ids.len() - index;
                        log::warn!(
                            "Failed to fetch {} for {}: {}; skipping {} business(es) on page at offset {}",
                            what,
                            id,
                            e,
                            abandoned,
                            page.offset
                        );
                        summary.skipped += abandoned;
                        break;
                    }
                }
            }
        }

        log::info!(
            "Review export finished: {} rows, {} skipped, {} available",
            summary.rows_written,
            summary.skipped,
            summary.total_available
        );
        Ok(summary)
    }

    /// Both exports under the same token
    pub async fn export_all<B: Write, R: Write>(
        &self,
        query: &SearchQuery,
        businesses: &mut RowWriter<B, BusinessRow>,
        reviews: &mut RowWriter<R, ReviewRow>,
    ) -> crate::Result<(ExportSummary, ExportSummary)> {
        let business_summary = self.export_businesses(query, businesses).await?;
        let review_summary = self.export_reviews(query, reviews).await?;
        Ok((business_summary, review_summary))
    }

    async fn plan(&self, query: &SearchQuery) -> Result<(PagePlan, ExportSummary), ApiError> {
        let probe = self
            .source
            .search(self.token, &query.term, &query.location, 1, 0)
            .await?;
        let plan = PagePlan::new(query.records, probe.total);
        log::debug!(
            "{} businesses available for '{}' in '{}'; exporting {} in pages of {}",
            probe.total,
            query.term,
            query.location,
            plan.limit,
            plan.page_size
        );

        let summary = ExportSummary {
            total_available: probe.total,
            ..ExportSummary::default()
        };
        Ok((plan, summary))
    }

    async fn page_ids(&self, query: &SearchQuery, page: Page) -> Result<Vec<String>, ApiError> {
        log::debug!("Fetching page offset={} size={}", page.offset, page.size);
        let result = self
            .source
            .search(
                self.token,
                &query.term,
                &query.location,
                page.size,
                page.offset,
            )
            .await?;

        Ok(result
            .businesses
            .into_iter()
            .take(page.size as usize)
            .map(|business| business.id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{BusinessDetail, BusinessSummary, ReviewSet, SearchPage};
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Serves `total` businesses named `biz-0`, `biz-1`, ...
    #[derive(Default)]
    struct FakeSource {
        total: u64,
        fail_search: bool,
        fail_details: HashSet<String>,
        fail_reviews: HashSet<String>,
        searches: Mutex<Vec<(u32, u32)>>,
    }

    impl FakeSource {
        fn with_total(total: u64) -> Self {
            Self {
                total,
                ..Self::default()
            }
        }

        fn searches(&self) -> Vec<(u32, u32)> {
            self.searches.lock().unwrap().clone()
        }
    }

    fn failure(endpoint: &str) -> ApiError {
        ApiError::Http {
            status: 500,
            endpoint: endpoint.to_string(),
            message: "boom".to_string(),
        }
    }

    #[async_trait]
    impl BusinessSource for FakeSource {
        async fn search(
            &self,
            _token: &BearerToken,
            _term: &str,
            _location: &str,
            limit: u32,
            offset: u32,
        ) -> Result<SearchPage, ApiError> {
            self.searches.lock().unwrap().push((limit, offset));
            if self.fail_search {
                return Err(failure("/search"));
            }
            let end = (u64::from(offset) + u64::from(limit)).min(self.total);
            let businesses = (u64::from(offset)..end)
                .map(|n| BusinessSummary {
                    id: format!("biz-{}", n),
                    name: None,
                })
                .collect();
            Ok(SearchPage {
                businesses,
                total: self.total,
            })
        }

        async fn business_details(
            &self,
            _token: &BearerToken,
            business_id: &str,
        ) -> Result<BusinessDetail, ApiError> {
            if self.fail_details.contains(business_id) {
                return Err(failure(business_id));
            }
            Ok(BusinessDetail {
                name: Some(format!("Name of {}", business_id)),
                ..BusinessDetail::default()
            })
        }

        async fn reviews(
            &self,
            _token: &BearerToken,
            business_id: &str,
        ) -> Result<ReviewSet, ApiError> {
            if self.fail_reviews.contains(business_id) {
                return Err(failure(business_id));
            }
            Ok(ReviewSet {
                total: Some(1),
                reviews: None,
            })
        }
    }

    fn token() -> BearerToken {
        BearerToken::new("test-token")
    }

    fn output<R: crate::core::records::Record>(writer: RowWriter<Vec<u8>, R>) -> Vec<String> {
        String::from_utf8(writer.finish().unwrap())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_plan_small_request_uses_single_page() {
        let plan = PagePlan::new(10, 500);
        assert_eq!(plan.page_size, 10);
        assert_eq!(plan.limit, 10);
        assert_eq!(plan.pages().collect::<Vec<_>>(), vec![Page { offset: 0, size: 10 }]);
    }

    #[test]
    fn test_plan_small_request_with_smaller_total() {
        let plan = PagePlan::new(30, 12);
        assert_eq!(plan.page_size, 30);
        assert_eq!(plan.pages().collect::<Vec<_>>(), vec![Page { offset: 0, size: 12 }]);
    }

    #[test]
    fn test_plan_caps_at_one_thousand() {
        let plan = PagePlan::new(5000, 40_000);
        assert_eq!(plan.page_size, 50);
        assert_eq!(plan.limit, 1000);

        let pages: Vec<Page> = plan.pages().collect();
        assert_eq!(pages.len(), 20);
        assert_eq!(pages.last(), Some(&Page { offset: 950, size: 50 }));
    }

    #[test]
    fn test_plan_offsets_step_by_page_size_below_total() {
        let plan = PagePlan::new(1000, 120);
        let pages: Vec<Page> = plan.pages().collect();

        assert_eq!(
            pages.iter().map(|p| p.offset).collect::<Vec<_>>(),
            vec![0, 50, 100]
        );
        for page in &pages {
            assert!(u64::from(page.offset + page.size) <= 120);
        }
        assert_eq!(pages.iter().map(|p| p.size).sum::<u32>(), 120);
    }

    #[test]
    fn test_plan_zero_requested_or_empty_total() {
        assert_eq!(PagePlan::new(0, 100).pages().count(), 0);
        assert_eq!(PagePlan::new(75, 0).pages().count(), 0);
    }

    #[tokio::test]
    async fn test_business_export_caps_rows_at_requested() {
        let source = FakeSource::with_total(120);
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let summary = exporter
            .export_businesses(&SearchQuery::new("pizza", "Boston", 75), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 75);
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.total_available, 120);
        assert_eq!(source.searches(), vec![(1, 0), (50, 0), (25, 50)]);

        let lines = output(writer);
        assert_eq!(lines.len(), 76);
        assert!(lines[0].starts_with("id|name|is_claimed"));
        assert!(lines[1].starts_with("biz-0|Name of biz-0|"));
        assert!(lines[75].starts_with("biz-74|"));
    }

    #[tokio::test]
    async fn test_business_export_stops_at_total() {
        let source = FakeSource::with_total(7);
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let summary = exporter
            .export_businesses(&SearchQuery::new("pizza", "Boston", 20), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 7);
        assert_eq!(source.searches(), vec![(1, 0), (7, 0)]);
    }

    #[tokio::test]
    async fn test_business_export_skips_failed_item() {
        let mut source = FakeSource::with_total(60);
        source.fail_details.insert("biz-3".to_string());
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let summary = exporter
            .export_businesses(&SearchQuery::new("pizza", "Boston", 60), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 59);
        assert_eq!(summary.skipped, 1);
        let lines = output(writer);
        assert!(lines.iter().all(|l| !l.starts_with("biz-3|")));
        assert!(lines.iter().any(|l| l.starts_with("biz-4|")));
    }

    #[tokio::test]
    async fn test_review_export_abandons_rest_of_page() {
        let mut source = FakeSource::with_total(60);
        source.fail_reviews.insert("biz-48".to_string());
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let summary = exporter
            .export_reviews(&SearchQuery::new("pizza", "Boston", 60), &mut writer)
            .await
            .unwrap();

        // biz-48 and biz-49 are lost, the second page (50..60) is still written
        assert_eq!(summary.rows_written, 58);
        assert_eq!(summary.skipped, 2);
        let lines = output(writer);
        assert_eq!(lines[0], "id|business_name|business_url|total_reviews|review_text|review_url|review_rating|review_time_created");
        assert!(lines.iter().any(|l| l.starts_with("biz-50|")));
        assert!(lines.iter().all(|l| !l.starts_with("biz-49|")));
    }

    #[tokio::test]
    async fn test_review_export_detail_failure_also_abandons_page() {
        let mut source = FakeSource::with_total(5);
        source.fail_details.insert("biz-0".to_string());
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let summary = exporter
            .export_reviews(&SearchQuery::new("pizza", "Boston", 5), &mut writer)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 0);
        assert_eq!(summary.skipped, 5);
        assert!(output(writer).is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_is_fatal() {
        let source = FakeSource {
            fail_search: true,
            ..FakeSource::with_total(10)
        };
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut writer = RowWriter::new(Vec::new());

        let result = exporter
            .export_businesses(&SearchQuery::new("pizza", "Boston", 5), &mut writer)
            .await;

        assert!(matches!(result, Err(AppError::Api(ApiError::Http { .. }))));
        assert_eq!(source.searches(), vec![(1, 0)]);
    }

    #[tokio::test]
    async fn test_export_all_shares_token_and_query() {
        let source = FakeSource::with_total(3);
        let token = token();
        let exporter = Exporter::new(&source, &token);
        let mut businesses = RowWriter::new(Vec::new());
        let mut reviews = RowWriter::new(Vec::new());

        let (b, r) = exporter
            .export_all(
                &SearchQuery::new("restaurants", "New York City, NY", 3),
                &mut businesses,
                &mut reviews,
            )
            .await
            .unwrap();

        assert_eq!(b.rows_written, 3);
        assert_eq!(r.rows_written, 3);
        assert_eq!(output(businesses).len(), 4);
        assert_eq!(output(reviews).len(), 4);
    }
}
