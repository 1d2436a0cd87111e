use crate::record::Snapshot;
use chrono::{DateTime, Utc};
use tracing::warn;

/// 单个仓库的活跃区间，从最早提交到最近提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySpan {
    pub repo: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: i64,
}

/// 从快照计算各仓库的活跃区间，按起始时间升序排列
///
/// 时间戳解析失败的记录跳过并记录日志，不影响其余仓库；
/// 结果交由外部消费方渲染时间线
pub fn activity_spans(snapshot: &Snapshot) -> Vec<ActivitySpan> {
    let mut spans = vec![];
    for (repo, record) in snapshot {
        let start = DateTime::parse_from_rfc3339(&record.first_commit);
        let end = DateTime::parse_from_rfc3339(&record.last_commit);
        let (start, end) = match (start, end) {
            (Ok(s), Ok(e)) => (s.with_timezone(&Utc), e.with_timezone(&Utc)),
            _ => {
                warn!("skip repo '{}', unparsable commit dates", repo);
                continue;
            }
        };

        spans.push(ActivitySpan {
            repo: repo.clone(),
            start,
            end,
            duration_days: (end - start).num_days(),
        });
    }

    spans.sort_by_key(|span| span.start);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RepoRecord;

    fn record(first: &str, last: &str) -> RepoRecord {
        RepoRecord {
            branches: vec![],
            first_commit: first.to_string(),
            last_commit: last.to_string(),
            total_commits: 1,
            pull_requests: 0,
            stars: 0,
            forks: 0,
            open_issues: 0,
            top_contributors: vec![],
        }
    }

    #[test]
    fn test_activity_spans_sorted_by_start() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "a/late".to_string(),
            record("2022-03-01T00:00:00Z", "2022-04-01T00:00:00Z"),
        );
        snapshot.insert(
            "a/early".to_string(),
            record("2020-01-01T00:00:00Z", "2021-01-01T00:00:00Z"),
        );

        let spans = activity_spans(&snapshot);
        assert_eq!(2, spans.len());
        assert_eq!("a/early", spans[0].repo);
        assert_eq!("a/late", spans[1].repo);
        assert_eq!(366, spans[0].duration_days);
        assert!(spans[0].start <= spans[0].end);
    }

    #[test]
    fn test_activity_spans_skip_unparsable() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "a/bad".to_string(),
            record("not-a-date", "2022-04-01T00:00:00Z"),
        );
        snapshot.insert(
            "a/good".to_string(),
            record("2020-01-01T00:00:00Z", "2020-02-01T00:00:00Z"),
        );

        let spans = activity_spans(&snapshot);
        assert_eq!(1, spans.len());
        assert_eq!("a/good", spans[0].repo);
    }
}
