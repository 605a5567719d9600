use crate::compose;
use crate::error::SignError;
use crate::grid::VoxelGrid;
use crate::palette::PALETTE;
use crate::shape;
use crate::spec::SignSpec;
use crate::text::TextRasterizer;
use crate::vox;

/// A generated sign, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignModel {
    pub label: String,
    /// Logical extents (before the container axis swap).
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Voxel count excluding the anchor.
    pub total_voxels: usize,
    /// Extents in container axis order.
    pub size: [u32; 3],
    /// Encoded `.vox` bytes.
    pub payload: Vec<u8>,
}

/// Run the geometry pipeline and return the finished grid.
///
/// Writes happen in a fixed order: background shape, then content, then the
/// anchor. The anchor is always the last write.
pub fn build(spec: &SignSpec, rasterizer: &dyn TextRasterizer) -> Result<VoxelGrid, SignError> {
    spec.validate()?;

    let mut grid = VoxelGrid::new();
    shape::rasterize(spec, &mut grid);
    compose::compose(spec, rasterizer, &mut grid)?;
    grid.place_anchor();
    Ok(grid)
}

/// Generate and encode a sign.
pub fn generate(spec: &SignSpec, rasterizer: &dyn TextRasterizer) -> Result<SignModel, SignError> {
    let grid = build(spec, rasterizer)?;
    Ok(assemble(spec, &grid))
}

/// Package a finished grid with its dimensions and encoded payload.
pub fn assemble(spec: &SignSpec, grid: &VoxelGrid) -> SignModel {
    let (width, height, depth) = (spec.width(), spec.height(), spec.depth());
    let size = vox::container_size(width, height, depth);
    let payload = vox::encode(grid, size, &PALETTE);
    let model = SignModel {
        label: spec.label(),
        width,
        height,
        depth,
        total_voxels: grid.len().saturating_sub(1),
        size,
        payload,
    };
    log::debug!(
        "{}: {} voxels, {} payload bytes",
        model.label,
        model.total_voxels,
        model.payload.len()
    );
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RasterError, SignError};
    use crate::palette;
    use crate::spec::HangingWidth;
    use crate::text::{BitmapFont, RasterizedText};

    #[test]
    fn invalid_spec_produces_nothing() {
        let err = generate(&SignSpec::standard(10, 40), &BitmapFont).unwrap_err();
        match err {
            SignError::Validation(v) => assert_eq!(v.field, "width"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn raster_failure_is_reported() {
        let mut spec = SignSpec::standard(32, 32);
        spec.text = "x".into();
        let failing = |_: &str, _: usize| -> Result<RasterizedText, RasterError> {
            Err(RasterError::Failed("offline".into()))
        };
        assert!(matches!(
            generate(&spec, &failing),
            Err(SignError::Raster(RasterError::Failed(_)))
        ));
    }

    #[test]
    fn anchor_present_on_hanging_sign() {
        let grid = build(&SignSpec::hanging(HangingWidth::W48, 1), &BitmapFont).unwrap();
        assert_eq!(grid.get(0, 0, 0), Some(palette::FRAME));
        // The backplate starts behind the face, so the origin holds only the anchor.
        assert_eq!(grid.iter().filter(|&((x, y, _), _)| x == 0 && y == 0).count(), 1);
    }

    #[test]
    fn assemble_reports_logical_and_container_sizes() {
        let spec = SignSpec::hanging(HangingWidth::W80, 3);
        let model = generate(&spec, &BitmapFont).unwrap();
        assert_eq!((model.width, model.height, model.depth), (80, 16, 19));
        assert_eq!(model.size, [80, 19, 16]);
        assert_eq!(model.label, "Hanging sign 80x16");
    }

    #[test]
    fn empty_unframed_sign_is_just_the_anchor() {
        let mut spec = SignSpec::standard(16, 16);
        if let crate::spec::SignKind::Standard(s) = &mut spec.sign {
            s.frame = false;
        }
        let grid = build(&spec, &BitmapFont).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(assemble(&spec, &grid).total_voxels, 0);
    }
}
