//! Mutable map state shared between frames: dataset, glyph registry, active
//! filter and the points placed by the latest pass.

use crate::dataset::Dataset;
use crate::glyph::GlyphRenderer;
use crate::hover::find_hover;
use crate::projection::{GeoProjector, MapRect};
use crate::registry::GlyphRegistry;
use crate::scene::{FilterSelection, PlacedPoint, compose_scene};

#[derive(Debug, Clone, Default)]
pub struct MapSession {
    dataset: Dataset,
    projector: GeoProjector,
    registry: GlyphRegistry,
    filter: FilterSelection,
    points: Vec<PlacedPoint>,
}

impl MapSession {
    /// Session over `dataset`, with the registry built from its categories and
    /// the filter taken from the URL `type` parameter when it names one of them.
    pub fn new(dataset: Dataset, filter_param: Option<&str>) -> Self {
        let registry = GlyphRegistry::from_categories(dataset.categories());
        let filter = FilterSelection::from_param(filter_param, dataset.categories());
        Self {
            projector: dataset.projector(),
            dataset,
            registry,
            filter,
            points: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    /// Takes effect from the next pass.
    pub fn set_filter(&mut self, filter: FilterSelection) {
        self.filter = filter;
    }

    /// Run one pass into `rect`, replacing the previous pass's points.
    pub fn render<R: GlyphRenderer + ?Sized>(&mut self, rect: &MapRect, renderer: &mut R) -> &[PlacedPoint] {
        self.points = compose_scene(
            self.dataset.rows(),
            &self.projector,
            rect,
            &self.filter,
            &mut self.registry,
            renderer,
        );
        &self.points
    }

    pub fn points(&self) -> &[PlacedPoint] {
        &self.points
    }

    pub fn hover(&self, cursor: (f64, f64)) -> Option<&PlacedPoint> {
        find_hover(cursor, &self.points)
    }
}
