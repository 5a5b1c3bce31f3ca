use anyhow::Result;
use rune_config::BorderRadius;
use rune_field::{InputOptions, Overlay, StyleOverrides};
use rune_raster::Point;

use super::{Page, Scene};
use crate::host::DemoHost;

/// Grid of fields exercising drop shadows, inset shadows and radii.
#[derive(Default)]
pub struct ShadowScene;

const VARIANTS: &[(&str, Option<&str>, Option<&str>, f32)] = &[
    ("plain", None, None, 3.0),
    ("drop", Some("0px 2px 6px rgba(0, 0, 0, 0.35)"), None, 4.0),
    ("inset", None, Some("0px 1px 4px rgba(0, 0, 0, 0.5)"), 4.0),
    ("both", Some("3px 3px 8px #336"), Some("0px 0px 6px #88a"), 12.0),
    ("pill", None, None, 100.0),
];

impl Scene for ShadowScene {
    fn name(&self) -> &'static str {
        "shadows"
    }

    fn run(&mut self, overlay: &mut Overlay<DemoHost>, page: &mut Page) -> Result<()> {
        let mut ids = Vec::new();
        for (row, (label, box_shadow, inner_shadow, radius)) in VARIANTS.iter().enumerate() {
            let id = overlay.create_input(InputOptions {
                value: Some((*label).into()),
                style: StyleOverrides {
                    width: Some(220.0),
                    height: Some(30.0),
                    border_radius: Some(BorderRadius::Uniform(*radius)),
                    box_shadow: box_shadow.map(String::from),
                    inner_shadow: inner_shadow.map(String::from),
                    ..StyleOverrides::default()
                },
                ..InputOptions::default()
            });
            overlay.set_position(id, Point::new(40.0, 30.0 + row as f32 * 56.0));
            ids.push((*label, id));
        }
        overlay.render(page.rect());
        page.snapshot(overlay, "shadows")?;

        for (label, id) in &ids {
            if let Some(texture) = overlay.field(*id).and_then(|f| f.texture()) {
                page.save_texture(texture, label)?;
            }
        }

        // Same look at 2x for high-density displays.
        for (_, id) in &ids {
            overlay.update_style(*id, |raw| raw.resolution = 2.0);
        }
        overlay.render(page.rect());
        for (label, id) in &ids {
            if let Some(texture) = overlay.field(*id).and_then(|f| f.texture()) {
                page.save_texture(texture, &format!("{label}@2x"))?;
            }
        }
        page.snapshot(overlay, "shadows-2x")?;
        Ok(())
    }
}
