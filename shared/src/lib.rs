pub mod colors;
pub mod dataset;
pub mod detail;
pub mod encoding;
pub mod glyph;
pub mod hover;
pub mod layout;
pub mod projection;
pub mod registry;
pub mod scene;
pub mod session;
pub mod table;

pub use colors::Rgba;
pub use dataset::{Dataset, DatasetSummary};
pub use detail::VolcanoDetail;
pub use glyph::{GLYPH_SET, GlyphKind, GlyphRenderer};
pub use projection::{GeoBounds, GeoProjector, MapRect, ProjectionMode};
pub use registry::GlyphRegistry;
pub use scene::{FilterSelection, PlacedPoint};
pub use session::MapSession;
