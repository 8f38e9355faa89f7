//! Debug image export.

use std::path::{Path, PathBuf};

use tidewater_config::OutputConfig;
use tidewater_worldgen::GeneratedWorld;
use tidewater_worldgen::debug_viz::{
    DebugImage, ExportError, render_chunk_debug, render_kind_map, render_node_grid,
    render_perimeters,
};

/// Renders the configured images into `output.dir` and returns their paths.
///
/// The kind map is always written; the chunk, node-grid and perimeter images
/// only when `debug_overlay` is set.
///
/// # Errors
///
/// Returns [`ExportError::TooLarge`] if `output.scale` makes the images exceed
/// [`MAX_IMAGE_SIDE`](tidewater_worldgen::debug_viz::MAX_IMAGE_SIDE), or another [`ExportError`] if a file cannot be written.
pub fn write_images(world: &GeneratedWorld, output: &OutputConfig) -> Result<Vec<PathBuf>, ExportError> {
    let scale = output.scale;

    let mut images: Vec<(&str, DebugImage)> = vec![("kinds.png", render_kind_map(&world.map, scale)?)];
    if output.debug_overlay {
        images.push(("chunks.png", render_chunk_debug(&world.map, scale)?));
        images.push(("nodes.png", render_node_grid(&world.params, &world.map, scale)?));
        images.push(("perimeters.png", render_perimeters(&world.map, scale)?));
    }

    std::fs::create_dir_all(&output.dir)?;
    let mut written = Vec::with_capacity(images.len());
    for (name, image) in images {
        let path = output.dir.join(name);
        save(&image, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn save(image: &DebugImage, path: &Path) -> Result<(), ExportError> {
    image.save_png(path)?;
    tracing::debug!(path = %path.display(), width = image.width, "Wrote debug image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_worldgen::debug_viz::MAX_IMAGE_SIDE;
    use tidewater_worldgen::{GenerationOptions, WorldGenerator, WorldParams};

    fn small_world() -> GeneratedWorld {
        let params = WorldParams {
            map_radius: 20,
            map_padding: 2,
            node_grid_size: 4,
            ..Default::default()
        };
        WorldGenerator::new(params, GenerationOptions::default())
            .unwrap()
            .generate(3)
            .unwrap()
    }

    #[test]
    fn test_writes_all_images_with_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("out"),
            scale: 2,
            ascii: false,
            debug_overlay: true,
        };
        let paths = write_images(&small_world(), &output).unwrap();
        assert_eq!(paths.len(), 4);
        for path in &paths {
            assert!(path.is_file(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_kind_map_only_without_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().to_path_buf(),
            scale: 1,
            ascii: false,
            debug_overlay: false,
        };
        let paths = write_images(&small_world(), &output).unwrap();
        assert_eq!(paths, vec![dir.path().join("kinds.png")]);
    }

    #[test]
    fn test_oversized_scale_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("out"),
            scale: MAX_IMAGE_SIDE,
            ascii: false,
            debug_overlay: true,
        };
        let err = write_images(&small_world(), &output).unwrap_err();
        assert!(matches!(err, ExportError::TooLarge { .. }));
        assert!(!output.dir.exists());
    }
}
