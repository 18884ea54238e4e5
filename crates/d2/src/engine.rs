//! Board nesting engine.
//!
//! The engine places boards one at a time. For each board it filters the
//! session's sheets by material and thickness, orders them by utilization and
//! tries every allowed rotation against every gap that can hold the padded
//! board. The first combination that stays on the sheet and does not collide
//! with a placed board wins. When nothing fits, a new stock sheet is opened
//! if the configuration allows it.

use crate::gap_calculator::GapCalculator;
use crate::rectangle::Rectangle;
use crate::sheet::Sheet;
use panel_nest_core::transform::Rotation;
use panel_nest_core::{
    Error, Gap, NestingConfig, NestingSummary, Placement, PlacementResult, Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reason prefix for failed sheet creation.
const SHEET_CREATION_FAILED: &str = "Failed to create new sheet";

/// Session state needed to open new sheets.
///
/// Hands out sheet ids (`sheet_1`, `sheet_2`, ...) for sheets the engine
/// creates on demand. An engine without a context can only use the sheets it
/// was given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingContext {
    name: String,
    sheets_issued: usize,
}

impl Default for NestingContext {
    fn default() -> Self {
        Self::new("nesting")
    }
}

impl NestingContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheets_issued: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sheet ids handed out so far.
    pub fn sheets_issued(&self) -> usize {
        self.sheets_issued
    }

    /// Returns the next sheet id.
    pub fn next_sheet_id(&mut self) -> String {
        self.sheets_issued += 1;
        format!("sheet_{}", self.sheets_issued)
    }
}

/// Places boards onto sheets.
#[derive(Debug, Clone)]
pub struct NestingEngine {
    config: NestingConfig,
    context: Option<NestingContext>,
    sheets: Vec<Sheet>,
    results: Vec<PlacementResult>,
    new_sheets_created: usize,
}

impl NestingEngine {
    /// Creates an engine that can open new sheets through `context`.
    pub fn new(config: NestingConfig, context: NestingContext) -> Result<Self> {
        Self::build(config, Some(context))
    }

    /// Creates an engine without a context; it can only fill existing sheets.
    pub fn detached(config: NestingConfig) -> Result<Self> {
        Self::build(config, None)
    }

    fn build(config: NestingConfig, context: Option<NestingContext>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            context,
            sheets: Vec::new(),
            results: Vec::new(),
            new_sheets_created: 0,
        })
    }

    pub fn config(&self) -> &NestingConfig {
        &self.config
    }

    pub fn context(&self) -> Option<&NestingContext> {
        self.context.as_ref()
    }

    // Sheet management

    /// Adds an existing sheet to the session and returns its index.
    ///
    /// The sheet's gap settings are replaced by the engine's spacing and
    /// minimum gap size.
    pub fn add_sheet(&mut self, mut sheet: Sheet) -> Result<usize> {
        sheet.validate()?;
        if self.sheets.iter().any(|s| s.id() == sheet.id()) {
            return Err(Error::InvalidSheet(format!(
                "sheet '{}' is already part of the session",
                sheet.id()
            )));
        }
        sheet.set_gap_calculator(GapCalculator::from_config(&self.config));
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Opens a default-size stock sheet for the given material and thickness.
    pub fn create_sheet(
        &mut self,
        material: Option<&str>,
        thickness: Option<f64>,
    ) -> Result<usize> {
        let size = (
            self.config.default_sheet_width,
            self.config.default_sheet_height,
        );
        self.open_sheet(size, material, thickness)
    }

    fn open_sheet(
        &mut self,
        (width, height): (f64, f64),
        material: Option<&str>,
        thickness: Option<f64>,
    ) -> Result<usize> {
        let Some(context) = self.context.as_mut() else {
            return Err(Error::MissingContext("no nesting context".into()));
        };

        let id = loop {
            let id = context.next_sheet_id();
            if !self.sheets.iter().any(|s| s.id() == id) {
                break id;
            }
        };

        let mut sheet = Sheet::new(id, width, height)
            .with_gap_calculator(GapCalculator::from_config(&self.config));
        if let Some(material) = material {
            sheet = sheet.with_material(material);
        }
        if let Some(thickness) = thickness {
            sheet = sheet.with_thickness(thickness);
        }

        log::info!(
            "Created sheet {} ({} x {} mm, {})",
            sheet.id(),
            sheet.width(),
            sheet.height(),
            sheet.classification_key()
        );

        self.sheets.push(sheet);
        self.new_sheets_created += 1;
        Ok(self.sheets.len() - 1)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Removes a placed board from whichever sheet holds it and returns the
    /// removed snapshot. The caller's own board is left untouched.
    pub fn remove_board(&mut self, id: &str) -> Option<Rectangle> {
        let sheet = self.sheets.iter_mut().find(|s| s.contains_board(id))?;
        let removed = sheet.board(id).cloned()?;
        sheet.remove_board(id);
        log::debug!("Removed board {} from sheet {}", id, sheet.id());
        Some(removed)
    }

    // Nesting

    /// Nests a single board.
    ///
    /// On success the board's placement is updated and a copy is recorded on
    /// the chosen sheet. Failures leave the board unchanged; they are returned
    /// as values and never abort the session.
    pub fn nest_board(&mut self, board: &mut Rectangle) -> PlacementResult {
        let result = self.place_board(board);

        match &result {
            PlacementResult::Placed { .. } => log::debug!("{result}"),
            PlacementResult::Failed { .. } => log::warn!("{result}"),
        }

        self.results.push(result.clone());
        result
    }

    /// Nests boards in order, continuing past failures.
    pub fn nest_boards(&mut self, boards: &mut [Rectangle]) -> Vec<PlacementResult> {
        self.nest_boards_with_progress(boards, |_, _, _| {})
    }

    /// Nests boards in order, calling `progress(index, total, board)` before
    /// each attempt. `index` starts at 1.
    ///
    /// Starts a new batch: results recorded by earlier calls are cleared, so
    /// [`placement_results`](Self::placement_results), the board counts and
    /// the board numbers in [`validate_nesting`](Self::validate_nesting) refer
    /// to this batch. Sheets and placed boards carry over.
    pub fn nest_boards_with_progress<F>(
        &mut self,
        boards: &mut [Rectangle],
        mut progress: F,
    ) -> Vec<PlacementResult>
    where
        F: FnMut(usize, usize, &Rectangle),
    {
        let total = boards.len();
        log::info!("Nesting {} boards onto {} sheets", total, self.sheets.len());
        self.results.clear();

        let mut results = Vec::with_capacity(total);
        for (i, board) in boards.iter_mut().enumerate() {
            progress(i + 1, total, board);
            results.push(self.nest_board(board));
        }

        let nested = results.iter().filter(|r| r.is_success()).count();
        log::info!(
            "Nested {}/{} boards ({} new sheets, {:.2}% average utilization)",
            nested,
            total,
            self.new_sheets_created,
            self.average_utilization()
        );

        results
    }

    fn place_board(&mut self, board: &mut Rectangle) -> PlacementResult {
        if let Err(e) = board.validate() {
            return PlacementResult::from_error(board.id(), &e);
        }
        if self.sheets.iter().any(|s| s.contains_board(board.id())) {
            return PlacementResult::failed(board.id(), "Board is already nested");
        }

        let rotations = Rotation::candidates(self.config.allow_rotation);

        for index in self.find_candidate_sheets(board) {
            if let Some((gap, placement)) = self.try_place_on_sheet(index, board, rotations) {
                return self.commit(index, board, gap, placement, false);
            }
        }

        if self.config.create_new_sheets {
            return self.create_and_place_on_new_sheet(board);
        }

        PlacementResult::no_placement(board.id())
    }

    /// Indices of sheets that accept the board, in trial order.
    fn find_candidate_sheets(&self, board: &Rectangle) -> Vec<usize> {
        let mut candidates: Vec<usize> = self
            .sheets
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                s.matches_board_within(board, self.config.thickness_tolerance)
                    && !s.is_full(self.config.full_threshold)
            })
            .map(|(i, _)| i)
            .collect();

        if self.config.optimize_utilization {
            self.sort_sheets_by_preference(&mut candidates);
        }

        candidates
    }

    /// Most utilized first when preferring existing sheets, least otherwise.
    fn sort_sheets_by_preference(&self, indices: &mut [usize]) {
        let prefer_existing = self.config.prefer_existing_sheets;
        indices.sort_by(|&a, &b| {
            let ua = self.sheets[a].utilization();
            let ub = self.sheets[b].utilization();
            if prefer_existing {
                ub.total_cmp(&ua)
            } else {
                ua.total_cmp(&ub)
            }
        });
    }

    fn try_place_on_sheet(
        &self,
        index: usize,
        board: &Rectangle,
        rotations: &[Rotation],
    ) -> Option<(Gap, Placement)> {
        let sheet = &self.sheets[index];
        let calculator = sheet.gap_calculator();

        for &rotation in rotations {
            for gap in calculator.fitting_gaps(sheet.gaps(), board, rotation) {
                let placement = Placement::new(gap.x, gap.y, rotation);
                if self.can_place(sheet, board, gap, placement) {
                    return Some((*gap, placement));
                }
                log::debug!(
                    "Board {} rejected at ({}, {}) @ {} on sheet {}",
                    board.id(),
                    gap.x,
                    gap.y,
                    rotation,
                    sheet.id()
                );
            }
        }

        None
    }

    /// Checks gap size, sheet bounds and collisions for a candidate placement.
    fn can_place(
        &self,
        sheet: &Sheet,
        board: &Rectangle,
        gap: &Gap,
        placement: Placement,
    ) -> bool {
        let (w, h) = board.dimensions_at(placement.rotation);
        if !gap.fits(w, h) {
            return false;
        }
        if !sheet.within_bounds(placement.x, placement.y, w, h) {
            return false;
        }
        !self.has_collision(sheet, board, placement)
    }

    /// Simulates the placement on a copy and tests it against placed boards.
    fn has_collision(&self, sheet: &Sheet, board: &Rectangle, placement: Placement) -> bool {
        let mut trial = board.clone();
        trial.place_at(placement.x, placement.y, placement.rotation);
        sheet.boards().iter().any(|placed| trial.overlaps_with(placed))
    }

    /// Opens a sheet for a board no existing sheet accepts and places the board
    /// at its origin. Boards larger than the stock size get a sheet grown to fit.
    fn create_and_place_on_new_sheet(&mut self, board: &mut Rectangle) -> PlacementResult {
        let (stock_w, stock_h) = (
            self.config.default_sheet_width,
            self.config.default_sheet_height,
        );
        let fitting = [Rotation::Deg0, Rotation::Deg90]
            .into_iter()
            .filter(|r| *r == Rotation::Deg0 || self.config.allow_rotation)
            .find(|&r| {
                let (w, h) = board.dimensions_at(r);
                w <= stock_w && h <= stock_h
            });

        let (rotation, size) = match fitting {
            Some(rotation) => (rotation, (stock_w, stock_h)),
            None => {
                let (w, h) = board.dimensions_at(Rotation::Deg0);
                log::warn!(
                    "Board {} ({} x {} mm) exceeds the stock sheet, opening an oversize sheet",
                    board.id(),
                    w,
                    h
                );
                (Rotation::Deg0, (stock_w.max(w), stock_h.max(h)))
            }
        };

        let index = match self.open_sheet(size, board.material(), board.thickness()) {
            Ok(index) => index,
            Err(Error::MissingContext(what)) => {
                return PlacementResult::failed(
                    board.id(),
                    format!("{SHEET_CREATION_FAILED}: {what}"),
                );
            }
            Err(e) => {
                return PlacementResult::failed(
                    board.id(),
                    format!("{SHEET_CREATION_FAILED}: {e}"),
                );
            }
        };

        let gap = Gap::new(0.0, 0.0, size.0, size.1);
        self.commit(index, board, gap, Placement::new(0.0, 0.0, rotation), true)
    }

    /// Records an accepted placement on the board and the sheet.
    fn commit(
        &mut self,
        index: usize,
        board: &mut Rectangle,
        gap: Gap,
        placement: Placement,
        new_sheet: bool,
    ) -> PlacementResult {
        board.place_at(placement.x, placement.y, placement.rotation);

        let sheet = &mut self.sheets[index];
        sheet.add_board(board.clone());

        PlacementResult::Placed {
            board_id: board.id().to_string(),
            sheet_index: index,
            sheet_id: sheet.id().to_string(),
            gap,
            placement,
            new_sheet,
        }
    }

    // Reporting

    /// Results of the current batch, in attempt order. Single
    /// [`nest_board`](Self::nest_board) calls append to it.
    pub fn placement_results(&self) -> &[PlacementResult] {
        &self.results
    }

    /// Failed attempts and overlapping board pairs, as readable messages.
    pub fn validate_nesting(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, result) in self.results.iter().enumerate() {
            if let PlacementResult::Failed { reason, .. } = result {
                errors.push(format!("Board {} failed to place: {}", i + 1, reason));
            }
        }

        for (s, sheet) in self.sheets.iter().enumerate() {
            let boards = sheet.boards();
            for i in 0..boards.len() {
                for j in (i + 1)..boards.len() {
                    if boards[i].overlaps_with(&boards[j]) {
                        errors.push(format!(
                            "Sheet {}: Board {} overlaps with Board {}",
                            s + 1,
                            i + 1,
                            j + 1
                        ));
                    }
                }
            }
        }

        errors
    }

    pub fn is_valid_nesting(&self) -> bool {
        self.validate_nesting().is_empty()
    }

    pub fn total_boards_nested(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn total_boards_failed(&self) -> usize {
        self.results.iter().filter(|r| !r.is_success()).count()
    }

    pub fn new_sheets_created(&self) -> usize {
        self.new_sheets_created
    }

    /// Mean sheet utilization as a percentage, rounded to 2 decimals.
    pub fn average_utilization(&self) -> f64 {
        if self.sheets.is_empty() {
            return 0.0;
        }
        let total: f64 = self.sheets.iter().map(Sheet::utilization).sum();
        let mean = total / self.sheets.len() as f64;
        (mean * 10_000.0).round() / 100.0
    }

    pub fn total_area_used(&self) -> f64 {
        self.sheets.iter().map(Sheet::used_area).sum()
    }

    pub fn total_area_available(&self) -> f64 {
        self.sheets.iter().map(Sheet::area).sum()
    }

    pub fn summary(&self) -> NestingSummary {
        NestingSummary {
            sheet_count: self.sheets.len(),
            new_sheets_created: self.new_sheets_created,
            boards_processed: self.results.len(),
            boards_nested: self.total_boards_nested(),
            boards_failed: self.total_boards_failed(),
            average_utilization_percent: self.average_utilization(),
            total_area_used: self.total_area_used(),
            total_area_available: self.total_area_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use panel_nest_core::NO_PLACEMENT_REASON;

    fn engine() -> NestingEngine {
        NestingEngine::new(NestingConfig::default(), NestingContext::default()).unwrap()
    }

    #[test]
    fn test_context_ids() {
        let mut ctx = NestingContext::new("job");
        assert_eq!(ctx.name(), "job");
        assert_eq!(ctx.next_sheet_id(), "sheet_1");
        assert_eq!(ctx.next_sheet_id(), "sheet_2");
        assert_eq!(ctx.sheets_issued(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = NestingConfig::default().with_min_spacing(-1.0);
        assert!(NestingEngine::detached(config).is_err());
    }

    #[test]
    fn test_add_sheet_applies_gap_settings() {
        let config = NestingConfig::default()
            .with_min_spacing(10.0)
            .with_min_gap_size(50.0);
        let mut engine = NestingEngine::detached(config).unwrap();
        let index = engine.add_sheet(Sheet::new("S1", 1000.0, 500.0)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(
            engine.sheets()[0].gap_calculator(),
            &GapCalculator::new(10.0, 50.0)
        );
    }

    #[test]
    fn test_add_sheet_rejects_invalid_and_duplicate() {
        let mut engine = engine();
        assert!(engine.add_sheet(Sheet::new("S0", 0.0, 500.0)).is_err());
        engine.add_sheet(Sheet::new("S1", 1000.0, 500.0)).unwrap();
        assert!(engine.add_sheet(Sheet::new("S1", 1000.0, 500.0)).is_err());
    }

    #[test]
    fn test_places_on_empty_sheet_at_origin() {
        let mut engine = engine();
        engine.add_sheet(Sheet::new("S1", 1000.0, 500.0)).unwrap();

        let mut board = Rectangle::rectangle("B1", 300.0, 200.0);
        let result = engine.nest_board(&mut board);

        assert!(result.is_success());
        assert!(!result.is_new_sheet());
        assert_eq!(result.sheet_index(), Some(0));
        assert_eq!(board.placement(), Some(Placement::origin()));
        assert!(engine.sheets()[0].contains_board("B1"));
    }

    #[test]
    fn test_rotation_used_when_needed() {
        let mut engine = NestingEngine::detached(NestingConfig::default()).unwrap();
        engine.add_sheet(Sheet::new("S1", 500.0, 1000.0)).unwrap();

        let mut board = Rectangle::rectangle("B1", 900.0, 300.0);
        let result = engine.nest_board(&mut board);
        assert!(result.is_success());
        assert_eq!(board.rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_rotation_disabled() {
        let config = NestingConfig::default()
            .with_rotation(false)
            .with_new_sheets(false);
        let mut engine = NestingEngine::detached(config).unwrap();
        engine.add_sheet(Sheet::new("S1", 500.0, 1000.0)).unwrap();

        let mut board = Rectangle::rectangle("B1", 900.0, 300.0);
        let result = engine.nest_board(&mut board);
        assert_eq!(result.reason(), Some(NO_PLACEMENT_REASON));
        assert!(!board.is_positioned());
    }

    #[test]
    fn test_invalid_board_reports_reason() {
        let mut engine = engine();
        let mut board = Rectangle::new("B1").with_outline(vec![(0.0, 0.0), (10.0, 0.0)]);
        let result = engine.nest_board(&mut board);
        let reason = result.reason().unwrap();
        assert!(reason.contains("Outline has less than 3 points"), "{reason}");
        assert_eq!(engine.new_sheets_created(), 0);
    }

    #[test]
    fn test_already_nested_board_rejected() {
        let mut engine = engine();
        let mut board = Rectangle::rectangle("B1", 300.0, 200.0);
        assert!(engine.nest_board(&mut board).is_success());
        let mut again = Rectangle::rectangle("B1", 300.0, 200.0);
        assert!(!engine.nest_board(&mut again).is_success());
    }

    #[test]
    fn test_new_sheet_inherits_board_classification() {
        let mut engine = engine();
        let mut board = Rectangle::rectangle("B1", 600.0, 400.0)
            .with_material("Oak")
            .with_thickness(18.0);
        let result = engine.nest_board(&mut board);

        assert!(result.is_new_sheet());
        let sheet = &engine.sheets()[0];
        assert_eq!(sheet.id(), "sheet_1");
        assert_eq!(sheet.material(), Some("Oak"));
        assert_eq!(sheet.thickness(), Some(18.0));
        assert_relative_eq!(sheet.width(), 2440.0);
        assert_relative_eq!(sheet.height(), 1220.0);
    }

    #[test]
    fn test_new_sheet_rotates_tall_board() {
        let mut engine = engine();
        let mut board = Rectangle::rectangle("B1", 1000.0, 2000.0);
        let result = engine.nest_board(&mut board);
        assert!(result.is_new_sheet());
        assert_eq!(board.placement(), Some(Placement::new(0.0, 0.0, Rotation::Deg90)));
    }

    #[test]
    fn test_new_sheet_skips_taken_ids() {
        let mut engine = engine();
        engine
            .add_sheet(Sheet::new("sheet_1", 100.0, 100.0).with_material("Pine"))
            .unwrap();
        let mut board = Rectangle::rectangle("B1", 600.0, 400.0).with_material("Oak");
        engine.nest_board(&mut board);
        assert_eq!(engine.sheets()[1].id(), "sheet_2");
    }

    #[test]
    fn test_oversize_board_gets_grown_sheet() {
        let mut engine = engine();
        let mut board = Rectangle::rectangle("B1", 3000.0, 1100.0).with_material("Oak");
        let result = engine.nest_board(&mut board);

        assert!(result.is_new_sheet());
        assert_eq!(board.placement(), Some(Placement::origin()));
        let sheet = &engine.sheets()[0];
        assert_relative_eq!(sheet.width(), 3000.0);
        assert_relative_eq!(sheet.height(), 1220.0);
        assert_eq!(sheet.material(), Some("Oak"));
        assert_eq!(result.gap(), Some(&Gap::new(0.0, 0.0, 3000.0, 1220.0)));
        assert!(engine.is_valid_nesting());
    }

    #[test]
    fn test_create_sheet_uses_stock_size() {
        let mut engine = engine();
        let index = engine.create_sheet(Some("Birch"), Some(12.0)).unwrap();
        let sheet = &engine.sheets()[index];
        assert_relative_eq!(sheet.width(), 2440.0);
        assert_relative_eq!(sheet.height(), 1220.0);
        assert_eq!(sheet.classification_key(), "Birch_12.0");
        assert_eq!(engine.new_sheets_created(), 1);
    }

    #[test]
    fn test_missing_context_fails_sheet_creation() {
        let mut engine = NestingEngine::detached(NestingConfig::default()).unwrap();
        let mut board = Rectangle::rectangle("B1", 600.0, 400.0);
        let result = engine.nest_board(&mut board);
        assert_eq!(
            result.reason(),
            Some("Failed to create new sheet: no nesting context")
        );
        assert!(matches!(
            engine.create_sheet(None, None),
            Err(Error::MissingContext(_))
        ));
    }

    #[test]
    fn test_full_sheet_skipped() {
        let mut engine = engine();
        engine.add_sheet(Sheet::new("S1", 1000.0, 1000.0)).unwrap();
        let mut filler = Rectangle::rectangle("F", 1000.0, 960.0);
        filler.place_at(0.0, 0.0, Rotation::Deg0);
        engine.sheet_mut(0).unwrap().add_board(filler);

        let candidates = engine.find_candidate_sheets(&Rectangle::rectangle("B1", 10.0, 10.0));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidate_order_follows_preference() {
        let mut engine = engine();
        engine.add_sheet(Sheet::new("S1", 1000.0, 1000.0)).unwrap();
        engine.add_sheet(Sheet::new("S2", 1000.0, 1000.0)).unwrap();
        let mut used = Rectangle::rectangle("U", 500.0, 500.0);
        used.place_at(0.0, 0.0, Rotation::Deg0);
        engine.sheet_mut(1).unwrap().add_board(used);

        let board = Rectangle::rectangle("B1", 100.0, 100.0);
        assert_eq!(engine.find_candidate_sheets(&board), vec![1, 0]);

        engine.config.prefer_existing_sheets = false;
        assert_eq!(engine.find_candidate_sheets(&board), vec![0, 1]);

        engine.config.optimize_utilization = false;
        engine.config.prefer_existing_sheets = true;
        assert_eq!(engine.find_candidate_sheets(&board), vec![0, 1]);
    }

    #[test]
    fn test_has_collision() {
        let mut engine = engine();
        engine.add_sheet(Sheet::new("S1", 1000.0, 1000.0)).unwrap();
        let mut placed = Rectangle::rectangle("P", 200.0, 200.0);
        placed.place_at(100.0, 100.0, Rotation::Deg0);
        engine.sheet_mut(0).unwrap().add_board(placed);

        let sheet = &engine.sheets()[0];
        let board = Rectangle::rectangle("B1", 100.0, 100.0);
        assert!(engine.has_collision(sheet, &board, Placement::new(150.0, 150.0, Rotation::Deg0)));
        assert!(!engine.has_collision(sheet, &board, Placement::new(400.0, 400.0, Rotation::Deg0)));
    }

    #[test]
    fn test_remove_board() {
        let mut engine = engine();
        let mut board = Rectangle::rectangle("B1", 300.0, 200.0);
        engine.nest_board(&mut board);

        let removed = engine.remove_board("B1").unwrap();
        assert_eq!(removed.id(), "B1");
        assert!(engine.sheets()[0].is_empty());
        assert!(board.is_positioned());
        assert!(engine.remove_board("B1").is_none());
    }

    #[test]
    fn test_validate_nesting_messages() {
        let mut engine = engine();
        engine.add_sheet(Sheet::new("S1", 1000.0, 1000.0)).unwrap();
        let mut a = Rectangle::rectangle("A", 200.0, 200.0);
        a.place_at(0.0, 0.0, Rotation::Deg0);
        let mut b = Rectangle::rectangle("B", 200.0, 200.0);
        b.place_at(100.0, 100.0, Rotation::Deg0);
        engine.sheet_mut(0).unwrap().add_board(a);
        engine.sheet_mut(0).unwrap().add_board(b);

        engine.config.create_new_sheets = false;
        let mut too_big = Rectangle::rectangle("C", 5000.0, 5000.0);
        engine.nest_board(&mut too_big);

        let errors = engine.validate_nesting();
        assert_eq!(
            errors,
            vec![
                "Board 1 failed to place: No suitable placement found".to_string(),
                "Sheet 1: Board 1 overlaps with Board 2".to_string(),
            ]
        );
        assert!(!engine.is_valid_nesting());
    }

    #[test]
    fn test_statistics() {
        let mut engine = engine();
        let mut boards = vec![
            Rectangle::rectangle("B1", 600.0, 400.0),
            Rectangle::new("B2"),
        ];
        engine.nest_boards(&mut boards);

        assert_eq!(engine.total_boards_nested(), 1);
        assert_eq!(engine.total_boards_failed(), 1);
        assert_eq!(engine.new_sheets_created(), 1);
        assert_relative_eq!(engine.total_area_used(), 240_000.0);
        assert_relative_eq!(engine.total_area_available(), 2_976_800.0);
        assert_relative_eq!(engine.average_utilization(), 8.06);

        let summary = engine.summary();
        assert_eq!(summary.boards_processed, 2);
        assert_eq!(summary.sheet_count, 1);
        assert!(!summary.all_nested());
    }

    #[test]
    fn test_batches_reset_results() {
        let mut engine = engine();
        let mut first = vec![Rectangle::new("bad"), Rectangle::rectangle("B1", 300.0, 200.0)];
        engine.nest_boards(&mut first);
        assert_eq!(engine.total_boards_failed(), 1);

        let mut second = vec![Rectangle::rectangle("B2", 300.0, 200.0)];
        engine.nest_boards(&mut second);

        assert_eq!(engine.placement_results().len(), 1);
        assert_eq!(engine.placement_results()[0].board_id(), "B2");
        assert_eq!(engine.total_boards_failed(), 0);
        assert!(engine.is_valid_nesting());
        // Placed boards carry over between batches
        assert_eq!(engine.sheets()[0].board_count(), 2);
    }

    #[test]
    fn test_empty_engine_statistics() {
        let engine = engine();
        assert_relative_eq!(engine.average_utilization(), 0.0);
        assert!(engine.is_valid_nesting());
        assert_eq!(engine.summary(), NestingSummary::default());
    }
}
