//! opcheck_analyser: Analysis orchestration.
//!
//! Checks any number of independent source units against one set of
//! options. Units share nothing but the interner and the read-only checker,
//! so they are checked in parallel.

use opcheck_ast::node::SourceUnit;
use opcheck_checker::{Checker, Scope};
use opcheck_core::intern::StringInterner;
use opcheck_diagnostics::DiagnosticCollection;
use opcheck_options::{AnalysisOptions, OptionsResult, ResolvedOptions};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

/// A unit together with the scope it starts in (parameters, properties
/// and other declarations the unit relies on).
pub struct AnalysisUnit<'a> {
    pub source: SourceUnit<'a>,
    pub scope: Scope,
}

impl<'a> AnalysisUnit<'a> {
    /// Pair a unit with the scope its statements start from.
    pub fn new(source: SourceUnit<'a>, scope: Scope) -> Self {
        Self { source, scope }
    }
}

pub struct Analyser {
    /// Options every unit is checked with.
    pub options: ResolvedOptions,
    checker: Checker,
}

impl Analyser {
    /// Create an analyser for already-resolved options.
    pub fn new(options: ResolvedOptions, interner: StringInterner) -> Self {
        let checker = Checker::with_options(&options, interner);
        Self { options, checker }
    }

    /// Resolve raw options first; fails on an out-of-range level.
    pub fn from_options(options: &AnalysisOptions, interner: StringInterner) -> OptionsResult<Self> {
        Ok(Self::new(options.resolve()?, interner))
    }

    /// Check every unit in parallel. Diagnostics are tagged with their
    /// unit's file name and sorted, so the result does not depend on the
    /// thread schedule.
    pub fn analyse(&self, units: &[AnalysisUnit<'_>]) -> DiagnosticCollection {
        let per_unit: Vec<DiagnosticCollection> = units
            .par_iter()
            .map(|unit| self.analyse_unit(unit))
            .collect();
        Self::merge(per_unit)
    }

    /// [`analyse`](Self::analyse) on the current thread only.
    pub fn analyse_sequential(&self, units: &[AnalysisUnit<'_>]) -> DiagnosticCollection {
        let per_unit: Vec<DiagnosticCollection> =
            units.iter().map(|unit| self.analyse_unit(unit)).collect();
        Self::merge(per_unit)
    }

    fn analyse_unit(&self, unit: &AnalysisUnit<'_>) -> DiagnosticCollection {
        let file_name = &unit.source.file_name;
        debug!(file = %file_name, level = self.options.level, "analysing unit");
        let mut tagged = DiagnosticCollection::new();
        for diagnostic in self
            .checker
            .check_unit(&unit.source, &unit.scope)
            .into_diagnostics()
        {
            tagged.add(diagnostic.with_file(file_name.as_str()));
        }
        tagged
    }

    fn merge(per_unit: Vec<DiagnosticCollection>) -> DiagnosticCollection {
        let mut all = DiagnosticCollection::new();
        for diagnostics in per_unit {
            all.extend(diagnostics);
        }
        all.sort();
        all
    }
}
