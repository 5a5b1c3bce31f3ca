use std::path::PathBuf;

use anyhow::{Context, Result};
use rune_field::Overlay;
use rune_raster::tiny_skia::{Color, Pixmap};

use crate::host::DemoHost;

pub mod form;
pub mod shadows;

pub trait Scene {
    fn name(&self) -> &'static str;
    /// Create fields and drive them, taking snapshots along the way.
    fn run(&mut self, overlay: &mut Overlay<DemoHost>, page: &mut Page) -> Result<()>;
}

/// Offscreen page the demo composites field backgrounds onto.
pub struct Page {
    width: u32,
    height: u32,
    out_dir: PathBuf,
    frames: usize,
}

impl Page {
    pub fn new(width: u32, height: u32, out_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        Ok(Self {
            width,
            height,
            out_dir,
            frames: 0,
        })
    }

    pub fn rect(&self) -> rune_raster::Rect {
        rune_raster::Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Composite every visible field and write `NN-label.png`.
    pub fn snapshot(&mut self, overlay: &Overlay<DemoHost>, label: &str) -> Result<PathBuf> {
        let mut pixmap = Pixmap::new(self.width, self.height)
            .context("page dimensions must be non-zero")?;
        pixmap.fill(Color::from_rgba8(0xf4, 0xf6, 0xfa, 0xff));
        for id in overlay.field_ids() {
            if let Some(field) = overlay.field(id) {
                field.node().paint(&mut pixmap);
            }
        }
        self.frames += 1;
        let path = self.out_dir.join(format!("{:02}-{label}.png", self.frames));
        save_png(&pixmap, &path)?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Write a single field texture as-is.
    pub fn save_texture(&self, texture: &rune_raster::FieldTexture, label: &str) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("texture-{label}.png"));
        save_png(texture.pixmap(), &path)?;
        log::info!("wrote {} ({}x{})", path.display(), texture.width(), texture.height());
        Ok(path)
    }
}

fn save_png(pixmap: &Pixmap, path: &std::path::Path) -> Result<()> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .context("pixel buffer size mismatch")?;
    img.save(path)
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}

pub fn by_name(name: &str) -> Option<Box<dyn Scene>> {
    match name {
        "form" => Some(Box::new(form::FormScene::default())),
        "shadows" => Some(Box::new(shadows::ShadowScene::default())),
        _ => None,
    }
}
