// src/job_board.rs
//! In-memory job list with a single selection. Nothing is persisted.

use chrono::Utc;

use crate::types::{AnalysisResult, Job};

#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: Vec<Job>,
    selected: Option<i64>,
    last_id: i64,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from seed data with the first job selected.
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let last_id = jobs.iter().map(|job| job.id).max().unwrap_or(0);
        let selected = jobs.first().map(|job| job.id);
        Self {
            jobs,
            selected,
            last_id,
        }
    }

    /// Newest first.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Millisecond timestamp, bumped so ids never repeat within a board.
    pub fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Prepends a job built from an analysis and selects it.
    pub fn add_analysis(&mut self, job_text: &str, result: &AnalysisResult) -> &Job {
        let id = self.next_id();
        let job = Job::from_analysis(id, job_text, result, Utc::now());
        self.jobs.insert(0, job);
        self.selected = Some(id);
        &self.jobs[0]
    }

    /// Re-scores an existing job in place. Order and selection are unchanged.
    pub fn update_analysis(&mut self, id: i64, result: &AnalysisResult) -> Option<&Job> {
        let job = self.jobs.iter_mut().find(|job| job.id == id)?;
        job.apply_analysis(result);
        Some(&*job)
    }

    pub fn select(&mut self, id: i64) -> Option<&Job> {
        let job = self.jobs.iter().find(|job| job.id == id)?;
        self.selected = Some(id);
        Some(job)
    }

    pub fn selected(&self) -> Option<&Job> {
        self.selected.and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::seed_jobs;

    #[test]
    fn test_add_prepends_and_selects() {
        let mut board = JobBoard::new();
        assert!(board.selected().is_none());

        let first = board.add_analysis("Platform engineer", &AnalysisResult::raw("ok")).id;
        let second = board.add_analysis("SRE", &AnalysisResult::raw("ok")).id;

        assert_eq!(board.len(), 2);
        assert_eq!(board.jobs()[0].id, second);
        assert_eq!(board.jobs()[1].id, first);
        assert_eq!(board.selected().map(|j| j.id), Some(second));
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut board = JobBoard::new();
        let ids: Vec<i64> = (0..50).map(|_| board.next_id()).collect();
        assert!(ids.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_seeded_board_selects_first() {
        let board = JobBoard::with_jobs(seed_jobs());
        assert_eq!(board.len(), 3);
        assert_eq!(board.selected().map(|j| j.id), Some(1));
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut board = JobBoard::with_jobs(seed_jobs());
        assert!(board.select(42).is_none());
        assert_eq!(board.selected().map(|j| j.id), Some(1));

        assert_eq!(board.select(3).map(|j| j.id), Some(3));
        assert_eq!(board.selected().map(|j| j.id), Some(3));
    }

    #[test]
    fn test_update_analysis_in_place() {
        let mut board = JobBoard::with_jobs(seed_jobs());
        let result = AnalysisResult::Structured(crate::types::StructuredAnalysis {
            match_score: Some(41),
            strengths: vec!["SQL".to_string()],
            missing_skills: vec!["Rust".to_string(), "Tokio".to_string()],
            summary: Some("Partial fit".to_string()),
        });

        let job = board.update_analysis(2, &result).unwrap();
        assert_eq!(job.match_score, Some(41));
        assert_eq!(job.why_match, vec!["SQL".to_string()]);
        assert_eq!(job.missing_keywords.len(), 2);
        assert_eq!(job.analysis.as_deref(), Some("Partial fit"));
        assert_eq!(job.company, "Northwind Analytics");

        assert_eq!(board.jobs()[1].id, 2);
        assert_eq!(board.selected().map(|j| j.id), Some(1));
        assert!(board.update_analysis(99, &result).is_none());
    }
}
