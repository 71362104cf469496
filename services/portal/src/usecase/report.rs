use drl_domain::role::Role;
use drl_domain::score::ScoreCard;

use crate::domain::repository::ReportRepository;
use crate::domain::types::{Caller, ReportFilter, StudentReport};
use crate::error::PortalError;

// ── ComputeReport ────────────────────────────────────────────────────────────

pub struct ComputeReportUseCase<R: ReportRepository> {
    pub repo: R,
}

impl<R: ReportRepository> ComputeReportUseCase<R> {
    /// Per-student point breakdown for the selected students.
    pub async fn execute(
        &self,
        caller: Caller,
        filter: &ReportFilter,
    ) -> Result<Vec<StudentReport>, PortalError> {
        caller.require(Role::Admin)?;
        if *filter == ReportFilter::Nobody {
            return Ok(Vec::new());
        }
        let students = self.repo.find_students(filter).await?;
        let mut reports = Vec::with_capacity(students.len());
        for student in students {
            let entries = self.repo.score_entries(student.id).await?;
            reports.push(StudentReport {
                student,
                card: ScoreCard::tally(entries),
            });
        }
        Ok(reports)
    }
}

// ── ListClasses ──────────────────────────────────────────────────────────────

pub struct ListClassesUseCase<R: ReportRepository> {
    pub repo: R,
}

impl<R: ReportRepository> ListClassesUseCase<R> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<String>, PortalError> {
        caller.require(Role::Admin)?;
        self.repo.list_classes().await
    }
}
