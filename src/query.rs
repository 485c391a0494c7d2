use crate::models::{JobApplication, Status};

/// Status criterion for a listing: everything, or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

/// Derives an ordered view of a store snapshot: status filter first, then
/// case-insensitive substring search over title, company, and tags, then
/// effective date descending. Stateless; recomputed per call.
pub fn filter_applications<'a>(
    snapshot: &'a [JobApplication],
    status: StatusFilter,
    search: &str,
) -> Vec<&'a JobApplication> {
    let query = search.trim().to_lowercase();

    let mut matches: Vec<&JobApplication> = snapshot
        .iter()
        .filter(|job| match status {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => job.status == wanted,
        })
        .filter(|job| query.is_empty() || matches_query(job, &query))
        .collect();

    // Stable sort: records sharing an effective date keep snapshot order.
    matches.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
    matches
}

fn matches_query(job: &JobApplication, query: &str) -> bool {
    job.position_title.to_lowercase().contains(query)
        || job.company.to_lowercase().contains(query)
        || job.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        id: &str,
        title: &str,
        company: &str,
        status: Status,
        application_date: Option<NaiveDate>,
        last_updated: NaiveDate,
        tags: &[&str],
    ) -> JobApplication {
        JobApplication {
            id: id.to_string(),
            site: "LinkedIn".to_string(),
            position_title: title.to_string(),
            company: company.to_string(),
            application_date,
            status,
            response_notes: String::new(),
            interview_date: None,
            job_posting_text: String::new(),
            job_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            last_updated,
        }
    }

    fn sample_snapshot() -> Vec<JobApplication> {
        vec![
            record(
                "1",
                "Frontend Developer",
                "TechCorp",
                Status::Interview,
                Some(date(2025, 1, 10)),
                date(2025, 1, 15),
                &["react", "remote"],
            ),
            record(
                "2",
                "Full Stack Developer",
                "StartupXYZ",
                Status::Submitted,
                Some(date(2025, 1, 8)),
                date(2025, 1, 8),
                &["node.js", "react"],
            ),
            record(
                "3",
                "React Developer",
                "Digital Solutions",
                Status::Rejected,
                Some(date(2025, 1, 5)),
                date(2025, 1, 12),
                &["react", "frontend"],
            ),
            record(
                "4",
                "Backend Engineer",
                "TechCorp",
                Status::Interview,
                Some(date(2025, 1, 20)),
                date(2025, 1, 21),
                &["rust"],
            ),
        ]
    }

    #[test]
    fn status_filter_keeps_only_exact_matches_in_date_order() {
        let snapshot = sample_snapshot();
        let results =
            filter_applications(&snapshot, StatusFilter::Only(Status::Interview), "");
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "1"]);
    }

    #[test]
    fn search_matches_title_company_and_tags_case_insensitively() {
        let snapshot = vec![record(
            "1",
            "Frontend Developer",
            "TechCorp",
            Status::Submitted,
            Some(date(2025, 1, 10)),
            date(2025, 1, 10),
            &["react", "remote"],
        )];

        for query in ["react", "REACT", "techcorp", "TechCorp", "frontend"] {
            let results = filter_applications(&snapshot, StatusFilter::All, query);
            assert_eq!(results.len(), 1, "query {query:?} should match");
        }

        assert!(filter_applications(&snapshot, StatusFilter::All, "java").is_empty());
    }

    #[test]
    fn search_query_is_trimmed_before_matching() {
        let snapshot = sample_snapshot();
        let padded = filter_applications(&snapshot, StatusFilter::All, "  react  ");
        let plain = filter_applications(&snapshot, StatusFilter::All, "react");
        assert_eq!(padded, plain);

        // whitespace-only means no text restriction
        let blank = filter_applications(&snapshot, StatusFilter::All, "   ");
        assert_eq!(blank.len(), snapshot.len());
    }

    #[test]
    fn missing_application_date_falls_back_to_last_updated() {
        let snapshot = vec![
            record(
                "1",
                "Backend Dev",
                "Acme",
                Status::Submitted,
                Some(date(2025, 1, 10)),
                date(2025, 1, 10),
                &[],
            ),
            record(
                "2",
                "Frontend Dev",
                "Acme",
                Status::Submitted,
                None,
                date(2025, 1, 15),
                &[],
            ),
            record(
                "3",
                "Platform Dev",
                "Acme",
                Status::Submitted,
                Some(date(2025, 1, 20)),
                date(2025, 1, 2),
                &[],
            ),
        ];
        let results = filter_applications(&snapshot, StatusFilter::All, "");
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn no_filters_returns_everything_sorted_descending() {
        let snapshot = sample_snapshot();
        let results = filter_applications(&snapshot, StatusFilter::All, "");
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn equal_effective_dates_keep_snapshot_order() {
        let snapshot = vec![
            record(
                "a",
                "Backend Dev",
                "Acme",
                Status::Submitted,
                Some(date(2025, 1, 10)),
                date(2025, 1, 10),
                &[],
            ),
            record(
                "b",
                "Frontend Dev",
                "Acme",
                Status::Submitted,
                Some(date(2025, 1, 10)),
                date(2025, 1, 11),
                &[],
            ),
        ];
        let results = filter_applications(&snapshot, StatusFilter::All, "");
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn filters_can_produce_an_empty_result() {
        let snapshot = sample_snapshot();
        let results =
            filter_applications(&snapshot, StatusFilter::Only(Status::Offer), "");
        assert!(results.is_empty());
    }
}
