//! Print or write the built-in showcase scene.

use std::path::PathBuf;

use anyhow::Context;
use levitate_scene_model::scene::SceneDescription;

pub fn run(write: Option<PathBuf>) -> anyhow::Result<()> {
    let scene = SceneDescription::showcase();

    match write {
        Some(path) => {
            scene
                .save(&path)
                .with_context(|| format!("Failed to write scene to {}", path.display()))?;
            println!("Scene written to {}", path.display());
            for object in &scene.objects {
                let p = object.rest_position;
                println!(
                    "  {:<12} at ({:.2}, {:.2}, {:.2})",
                    object.id.as_str(),
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
        None => println!("{}", scene.to_json()?),
    }

    Ok(())
}
